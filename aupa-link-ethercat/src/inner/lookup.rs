use ethercrab::{std::ethercat_now, MainDevice, MainDeviceConfig, PduStorage, Timeouts};

use super::handler::{MAX_FRAMES, MAX_PDU_DATA, MAX_SUBDEVICES, PDI_LEN};
use crate::error::EtherCATError;

pub(crate) const AUTD3_DEVICE_NAME: &str = "AUTD";

/// Scan every network interface and return the first one with only AUTD3 devices on its bus
pub(crate) async fn lookup_autd() -> Result<String, EtherCATError> {
    let interfaces = pnet_datalink::interfaces();
    tracing::debug!("found {} network interfaces", interfaces.len());

    for interface in interfaces
        .into_iter()
        .filter(|i| !i.is_loopback() && i.is_up())
    {
        tracing::debug!("searching AUTD3 devices on {}", interface.name);
        if scan(&interface.name).await {
            tracing::info!("found AUTD3 devices on {}", interface.name);
            return Ok(interface.name);
        }
    }
    Err(EtherCATError::DeviceNotFound)
}

async fn scan(ifname: &str) -> bool {
    // Each scan needs its own storage since a storage can be split only once.
    let pdu_storage: &'static PduStorage<MAX_FRAMES, MAX_PDU_DATA> =
        Box::leak(Box::new(PduStorage::new()));
    let Ok((tx, rx, pdu_loop)) = pdu_storage.try_split() else {
        tracing::error!("failed to split PDU storage");
        return false;
    };

    let tx_rx_th = {
        let ifname = ifname.to_owned();
        std::thread::spawn(move || match ethercrab::std::tx_rx_task(&ifname, tx, rx) {
            Ok(fut) => match tokio::runtime::Builder::new_current_thread().build() {
                Ok(runtime) => {
                    let _ = runtime.block_on(fut);
                }
                Err(e) => tracing::error!("failed to create runtime: {}", e),
            },
            Err(e) => tracing::trace!("failed to start TX/RX task on {}: {}", ifname, e),
        })
    };

    let main_device = MainDevice::new(pdu_loop, Timeouts::default(), MainDeviceConfig::default());
    let found = match main_device
        .init_single_group::<MAX_SUBDEVICES, PDI_LEN>(ethercat_now)
        .await
    {
        Ok(group) => {
            !group.is_empty()
                && group
                    .iter(&main_device)
                    .all(|sub_device| sub_device.name() == AUTD3_DEVICE_NAME)
        }
        Err(e) => {
            tracing::trace!("failed to initialize EtherCAT on {}: {}", ifname, e);
            false
        }
    };

    // SAFETY: the group borrowing the main device has been dropped.
    unsafe { main_device.release_all() };
    let _ = tx_rx_th.join();
    found
}
