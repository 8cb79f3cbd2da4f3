use std::{fmt::Debug, hash::Hash};

use bit_vec::BitVec;

use aupa_driver::derive::*;

type DeviceKeyFn<K> = Box<dyn Fn(&Device, &Transducer) -> Option<K> + Send + Sync>;

/// Gain dispatching each transducer to a sub-gain by key
///
/// Transducers for which the keying function returns `None` are not driven.
#[derive(Gain)]
pub struct Group<K, F>
where
    K: Hash + Eq + Clone + Debug,
    F: Fn(&Device, &Transducer) -> Option<K>,
{
    f: F,
    gain_map: HashMap<K, Box<dyn Gain + Send>>,
}

impl<K, F> Group<K, F>
where
    K: Hash + Eq + Clone + Debug,
    F: Fn(&Device, &Transducer) -> Option<K>,
{
    /// Group by transducer
    ///
    /// # Arguments
    ///
    /// `f` - function to get key from transducer
    ///
    /// # Example
    ///
    /// ```
    /// # use aupa::prelude::*;
    /// let gain = Group::new(|_dev, tr| match tr.idx() {
    ///     0..=100 => Some("null"),
    ///     101.. => Some("focus"),
    /// })
    /// .set("null", Null::new())
    /// .set("focus", Focus::new(Vector3::new(0.0, 0.0, 150.0)));
    /// ```
    pub fn new(f: F) -> Group<K, F> {
        Group {
            f,
            gain_map: HashMap::new(),
        }
    }

    /// set gain
    ///
    /// # Arguments
    ///
    /// * `key` - key
    /// * `gain` - Gain
    ///
    pub fn set<G: Gain + Send + 'static>(mut self, key: K, gain: G) -> Self {
        self.gain_map.insert(key, Box::new(gain));
        self
    }

    fn get_filters(&self, geometry: &Geometry) -> HashMap<K, HashMap<usize, BitVec<u32>>> {
        let mut filters: HashMap<K, HashMap<usize, BitVec<u32>>> = HashMap::new();
        geometry.devices().for_each(|dev| {
            dev.iter().for_each(|tr| {
                if let Some(key) = (self.f)(dev, tr) {
                    filters
                        .entry(key)
                        .or_default()
                        .entry(dev.idx())
                        .or_insert_with(|| BitVec::from_elem(dev.num_transducers(), false))
                        .set(tr.idx(), true);
                }
            })
        });
        filters
    }
}

impl<K> Group<K, DeviceKeyFn<K>>
where
    K: Hash + Eq + Clone + Debug + 'static,
{
    /// Group by device
    ///
    /// # Arguments
    ///
    /// `f` - function to get key from device
    ///
    pub fn by_device(f: impl Fn(&Device) -> Option<K> + Send + Sync + 'static) -> Self {
        Self::new(Box::new(move |dev, _| f(dev)))
    }
}

fn is_selected(filter: &GainFilter, dev: &Device, tr: &Transducer) -> bool {
    match filter {
        GainFilter::All => true,
        GainFilter::Filter(filter) => filter
            .get(&dev.idx())
            .and_then(|mask| mask.get(tr.idx()))
            .unwrap_or(false),
    }
}

impl<K, F> Gain for Group<K, F>
where
    K: Hash + Eq + Clone + Debug,
    F: Fn(&Device, &Transducer) -> Option<K>,
{
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        let mut filters = self.get_filters(geometry);

        if let Some(k) = self.gain_map.keys().find(|k| !filters.contains_key(k)) {
            return Err(AUPAInternalError::UnknownGroupKey(format!("{:?}", k)));
        }
        if let Some(k) = filters.keys().find(|k| !self.gain_map.contains_key(k)) {
            return Err(AUPAInternalError::UnspecifiedGroupKey(format!("{:?}", k)));
        }

        if let GainFilter::Filter(outer) = &filter {
            filters.values_mut().for_each(|masks| {
                masks.iter_mut().for_each(|(dev_idx, mask)| match outer.get(dev_idx) {
                    Some(outer) if outer.len() == mask.len() => {
                        mask.and(outer);
                    }
                    _ => mask.clear(),
                })
            });
        }

        let drives_cache = self
            .gain_map
            .iter()
            .map(|(k, g)| {
                let filter = filters
                    .get(k)
                    .ok_or_else(|| AUPAInternalError::UnknownGroupKey(format!("{:?}", k)))?;
                Ok((k.clone(), g.calc(geometry, GainFilter::Filter(filter))?))
            })
            .collect::<Result<HashMap<_, _>, AUPAInternalError>>()?;

        geometry
            .devices()
            .map(|dev| {
                Ok((
                    dev.idx(),
                    dev.iter()
                        .map(|tr| {
                            if !is_selected(&filter, dev, tr) {
                                return Ok(Drive::null());
                            }
                            match (self.f)(dev, tr) {
                                Some(key) => drives_cache
                                    .get(&key)
                                    .ok_or_else(|| {
                                        AUPAInternalError::UnspecifiedGroupKey(format!(
                                            "{:?}",
                                            key
                                        ))
                                    })?
                                    .get(&dev.idx())
                                    .and_then(|d| d.get(tr.idx()))
                                    .copied()
                                    .ok_or(AUPAInternalError::GainIncomplete(dev.idx())),
                                None => Ok(Drive::null()),
                            }
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                ))
            })
            .collect()
    }
}
