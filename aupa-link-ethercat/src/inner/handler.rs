use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use async_channel::{bounded, Receiver, Sender, TrySendError};
use aupa_driver::{
    cpu::{RxMessage, TxDatagram, EC_INPUT_FRAME_SIZE, EC_OUTPUT_FRAME_SIZE},
    error::AUPAInternalError,
};
use ethercrab::{
    std::ethercat_now,
    subdevice_group::{DcConfiguration, HasDc, Op, PreOpPdi},
    DcSync, MainDevice, PduStorage, RegisterAddress, SubDeviceGroup,
};
use tokio::sync::watch;

use super::{
    io::{read_inputs, write_output},
    lookup::{lookup_autd, AUTD3_DEVICE_NAME},
    smoothing::Smoothing,
    state::{State, SubDeviceStateExt},
};
use crate::{
    builder::{EtherCATBuilder, OnErrCallback, OnLostCallback, TimerStrategy},
    error::EtherCATError,
    status::Status,
};

pub(crate) const MAX_SUBDEVICES: usize = 32;
pub(crate) const MAX_PDU_DATA: usize =
    PduStorage::element_size((EC_OUTPUT_FRAME_SIZE + EC_INPUT_FRAME_SIZE) * MAX_SUBDEVICES);
pub(crate) const MAX_FRAMES: usize = 16;
pub(crate) const PDI_LEN: usize = (EC_OUTPUT_FRAME_SIZE + EC_INPUT_FRAME_SIZE) * MAX_SUBDEVICES;

static PDU_STORAGE: PduStorage<MAX_FRAMES, MAX_PDU_DATA> = PduStorage::new();

type OpGroup = SubDeviceGroup<MAX_SUBDEVICES, PDI_LEN, Op, HasDc>;

pub(crate) struct EtherCATHandler {
    is_open: Arc<AtomicBool>,
    main_th: Option<std::thread::JoinHandle<()>>,
    state_check_task: Option<tokio::task::JoinHandle<()>>,
    sender: Sender<TxDatagram>,
    inputs_rx: watch::Receiver<Vec<u8>>,
    interval: Duration,
}

impl EtherCATHandler {
    pub async fn open(
        builder: EtherCATBuilder,
        num_devices: usize,
    ) -> Result<EtherCATHandler, EtherCATError> {
        let EtherCATBuilder {
            ifname,
            buf_size,
            sync0_period,
            sync_tolerance,
            sync_timeout,
            state_check_interval,
            timeouts,
            main_device_config,
            timer_strategy,
            thread_builder,
            on_lost,
            on_err,
        } = builder;

        let interface = match ifname {
            Some(ifname) => ifname,
            None => lookup_autd().await?,
        };
        tracing::info!("opening EtherCAT link on {}", interface);

        let (tx, rx, pdu_loop) = PDU_STORAGE
            .try_split()
            .map_err(|_| EtherCATError::PduStorageError)?;

        let state_transition_timeout = timeouts.state_transition;
        let main_device = Arc::new(MainDevice::new(pdu_loop, timeouts, main_device_config));

        std::thread::Builder::new()
            .name("aupa-ethercat-tx-rx".to_owned())
            .spawn({
                let interface = interface.clone();
                move || match ethercrab::std::tx_rx_task(&interface, tx, rx) {
                    Ok(fut) => match tokio::runtime::Builder::new_current_thread().build() {
                        Ok(runtime) => {
                            if let Err(e) = runtime.block_on(fut) {
                                tracing::error!("TX/RX task failed: {}", e);
                            }
                            tracing::debug!("TX/RX task exited");
                        }
                        Err(e) => tracing::error!("failed to create runtime: {}", e),
                    },
                    Err(e) => tracing::error!("failed to start TX/RX task: {}", e),
                }
            })?;

        let mut group = main_device
            .init_single_group::<MAX_SUBDEVICES, PDI_LEN>(ethercat_now)
            .await?;

        if num_devices != group.len() {
            return Err(EtherCATError::DeviceNumberMismatch(num_devices, group.len()));
        }
        if let Some(idx) = group
            .iter(&main_device)
            .position(|sub_device| sub_device.name() != AUTD3_DEVICE_NAME)
        {
            return Err(EtherCATError::NotAUTD3Device(idx));
        }
        tracing::info!(
            "found {} AUTD3 device{} on {}",
            group.len(),
            if group.len() > 1 { "s" } else { "" },
            interface
        );

        group.iter_mut(&main_device).for_each(|mut sub_device| {
            sub_device.set_dc_sync(DcSync::Sync0);
        });

        tracing::info!("moving into PRE-OP with PDI");
        let group = group.into_pre_op_pdi(&main_device).await?;

        wait_for_align(&group, &main_device, sync_tolerance, sync_timeout).await?;

        tracing::info!("configuring Sync0 with period {:?}", sync0_period);
        let group = group
            .configure_dc_sync(
                &main_device,
                DcConfiguration {
                    start_delay: Duration::from_millis(100),
                    sync0_period,
                    sync0_shift: Duration::ZERO,
                },
            )
            .await?;

        let group = group.into_safe_op(&main_device).await?;
        tracing::info!("all devices are in SAFE-OP, requesting OP");
        let group = Arc::new(group.request_into_op(&main_device).await?);
        let op_request = Instant::now();

        let is_open = Arc::new(AtomicBool::new(true));
        let all_op = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = bounded(buf_size.max(1));
        let (inputs_tx, inputs_rx) = watch::channel(vec![0x00u8; group.len() * EC_INPUT_FRAME_SIZE]);

        let main_th = thread_builder.spawn({
            let is_open = is_open.clone();
            let all_op = all_op.clone();
            let group = group.clone();
            let main_device = main_device.clone();
            move |priority| {
                if let Err(e) = priority {
                    tracing::warn!("failed to set priority of process data thread: {:?}", e);
                }
                match tokio::runtime::Builder::new_current_thread().build() {
                    Ok(runtime) => runtime.block_on(process_data_loop(
                        is_open,
                        all_op,
                        main_device,
                        group,
                        inputs_tx,
                        receiver,
                        timer_strategy,
                    )),
                    Err(e) => tracing::error!("failed to create runtime: {}", e),
                }
            }
        })?;

        let run = Arc::new(AtomicBool::new(false));
        let state_check_task = tokio::task::spawn_blocking({
            let is_open = is_open.clone();
            let run = run.clone();
            move || {
                tokio::runtime::Handle::current().block_on(state_check(
                    is_open,
                    run,
                    main_device,
                    group,
                    on_lost,
                    on_err,
                    state_check_interval,
                ))
            }
        });

        while !all_op.load(Ordering::Relaxed) {
            if op_request.elapsed() > state_transition_timeout {
                is_open.store(false, Ordering::Relaxed);
                return Err(EtherCATError::NotResponding);
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        tracing::info!("all devices entered OP in {:?}", op_request.elapsed());
        run.store(true, Ordering::Relaxed);

        Ok(EtherCATHandler {
            is_open,
            main_th: Some(main_th),
            state_check_task: Some(state_check_task),
            sender,
            inputs_rx,
            interval: sync0_period,
        })
    }

    pub async fn close(&mut self) {
        if !self.is_open() {
            return;
        }

        let start = Instant::now();
        while !self.sender.is_empty() {
            if start.elapsed() > Duration::from_secs(5) {
                tracing::warn!("timeout while waiting for the send queue to be empty");
                break;
            }
            tokio::time::sleep(self.interval).await;
        }

        self.is_open.store(false, Ordering::Relaxed);
        self.sender.close();

        if let Some(th) = self.main_th.take() {
            let _ = th.join();
        }
        if let Some(task) = self.state_check_task.take() {
            let _ = task.await;
        }
        tracing::info!("EtherCAT link closed");
    }

    pub fn send(&self, tx: &TxDatagram) -> Result<bool, AUPAInternalError> {
        match self.sender.try_send(tx.clone()) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Closed(_)) => Err(AUPAInternalError::LinkClosed),
        }
    }

    pub fn receive(&self, rx: &mut [RxMessage]) {
        read_inputs(&self.inputs_rx.borrow(), rx);
    }

    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::Relaxed)
    }
}

async fn wait_for_align(
    group: &SubDeviceGroup<MAX_SUBDEVICES, PDI_LEN, PreOpPdi>,
    main_device: &MainDevice<'_>,
    sync_tolerance: Duration,
    sync_timeout: Duration,
) -> Result<(), EtherCATError> {
    tracing::info!("waiting for device clocks to align");

    let mut averages = vec![Smoothing::new(0.2); group.len()];
    let mut now = Instant::now();
    let start = Instant::now();
    loop {
        group.tx_rx_sync_system_time(main_device).await?;

        if now.elapsed() >= Duration::from_millis(10) {
            now = Instant::now();

            let mut max_deviation = Duration::ZERO;
            for (sub_device, ema) in group.iter(main_device).zip(averages.iter_mut()) {
                let diff = match sub_device
                    .register_read::<u32>(RegisterAddress::DcSystemTimeDifference)
                    .await
                {
                    Ok(value) => {
                        // sign-magnitude
                        const MASK: u32 = 0x7FFFFFFF;
                        if value & !MASK != 0 {
                            -((value & MASK) as i32)
                        } else {
                            value as i32
                        }
                    }
                    Err(ethercrab::error::Error::WorkingCounter { .. }) => 0,
                    Err(e) => return Err(e.into()),
                };
                let diff = Duration::from_nanos(ema.push(diff as f32).abs() as u64);
                max_deviation = max_deviation.max(diff);
            }

            tracing::debug!("maximum system time difference is {:?}", max_deviation);
            if max_deviation < sync_tolerance {
                tracing::info!("clocks settled after {:?}", start.elapsed());
                return Ok(());
            }
            if start.elapsed() > sync_timeout {
                return Err(EtherCATError::SyncTimeout(max_deviation));
            }
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

async fn process_data_loop(
    running: Arc<AtomicBool>,
    all_op: Arc<AtomicBool>,
    main_device: Arc<MainDevice<'static>>,
    group: Arc<OpGroup>,
    inputs_tx: watch::Sender<Vec<u8>>,
    receiver: Receiver<TxDatagram>,
    timer_strategy: TimerStrategy,
) {
    let mut inputs_buf = vec![0u8; group.len() * EC_INPUT_FRAME_SIZE];
    while running.load(Ordering::Relaxed) {
        let start = Instant::now();
        let next_cycle = match group.tx_rx_dc(&main_device).await {
            Ok(resp) => {
                all_op.store(resp.all_op(), Ordering::Relaxed);
                group
                    .iter(&main_device)
                    .enumerate()
                    .for_each(|(idx, sub_device)| {
                        let offset = idx * EC_INPUT_FRAME_SIZE;
                        let inputs = sub_device.inputs_raw();
                        let n = inputs.len().min(EC_INPUT_FRAME_SIZE);
                        inputs_buf[offset..offset + n].copy_from_slice(&inputs[..n]);
                    });
                inputs_tx.send_modify(|v| v.copy_from_slice(&inputs_buf));
                start + resp.extra.next_cycle_wait
            }
            Err(ethercrab::error::Error::WorkingCounter { .. }) => {
                tracing::warn!("working counter error");
                continue;
            }
            Err(e) => {
                if running.load(Ordering::Relaxed) {
                    tracing::error!("failed to perform DC synchronized TX/RX: {}", e);
                }
                continue;
            }
        };

        if let Ok(tx) = receiver.try_recv() {
            group
                .iter(&main_device)
                .zip(tx.iter())
                .for_each(|(sub_device, msg)| {
                    write_output(msg, &mut sub_device.outputs_raw_mut());
                });
        }

        timer_strategy.sleep(next_cycle.saturating_duration_since(Instant::now()));
    }
}

async fn state_check(
    is_open: Arc<AtomicBool>,
    run: Arc<AtomicBool>,
    main_device: Arc<MainDevice<'static>>,
    group: Arc<OpGroup>,
    on_lost: Option<OnLostCallback>,
    on_err: Option<OnErrCallback>,
    interval: Duration,
) {
    let notify = |idx: usize, status: Status| {
        tracing::warn!("device {}: {}", idx, status);
        if run.load(Ordering::Relaxed) {
            if let Some(f) = &on_err {
                f(idx, status);
            }
        }
    };

    let mut lost = vec![false; group.len()];
    let mut do_check_state = false;
    while is_open.load(Ordering::Relaxed) {
        let mut all_op = true;
        for (idx, sub_device) in group.iter(&main_device).enumerate() {
            let state = match sub_device.read_state().await {
                Ok(state) if state != State::NONE => state,
                Ok(_) | Err(ethercrab::error::Error::WorkingCounter { .. }) => {
                    all_op = false;
                    do_check_state = true;
                    if !lost[idx] {
                        lost[idx] = true;
                        let msg = format!("device {} is lost", idx);
                        tracing::error!("{}", msg);
                        notify(idx, Status::Lost);
                        if run.load(Ordering::Relaxed) {
                            if let Some(f) = &on_lost {
                                f(&msg);
                            }
                        }
                    }
                    continue;
                }
                Err(e) => {
                    all_op = false;
                    do_check_state = true;
                    if is_open.load(Ordering::Relaxed) {
                        tracing::error!("failed to read state of device {}: {}", idx, e);
                        continue;
                    }
                    break;
                }
            };
            lost[idx] = false;
            if state == State::OPERATIONAL {
                continue;
            }

            all_op = false;
            do_check_state = true;
            let (request, status) = if state.is_safe_op() && state.is_error() {
                (State::SAFE_OP.with_ack(), Status::Error)
            } else if state.is_safe_op() {
                (State::OPERATIONAL, Status::StateChanged)
            } else {
                tracing::error!("device {} is in unexpected state: {}", idx, state);
                continue;
            };
            match sub_device.write_state(&main_device, request).await {
                Ok(_) => notify(idx, status),
                Err(e) => tracing::trace!("failed to write state of device {}: {}", idx, e),
            }
        }

        if do_check_state && all_op {
            do_check_state = false;
            notify(0, Status::Resumed);
        }
        tokio::time::sleep(interval).await;
    }
}
