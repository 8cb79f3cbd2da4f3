use std::{
    cell::{Ref, RefCell},
    collections::HashMap,
    rc::Rc,
};

use crate::derive::*;

/// Gain to cache the result of calculation
///
/// The inner gain is evaluated again only when the set of enabled devices changes.
#[derive(Gain, Debug)]
pub struct Cache<G: Gain + 'static> {
    gain: Rc<G>,
    cache: Rc<RefCell<HashMap<usize, Vec<Drive>>>>,
}

impl<G: Gain + 'static> std::ops::Deref for Cache<G> {
    type Target = G;

    fn deref(&self) -> &Self::Target {
        &self.gain
    }
}

pub trait IntoCache<G: Gain + 'static> {
    /// Cache the result of calculation
    fn with_cache(self) -> Cache<G>;
}

impl<G: Gain + 'static> IntoCache<G> for G {
    fn with_cache(self) -> Cache<G> {
        Cache::new(self)
    }
}

impl<G: Gain + 'static> Clone for Cache<G> {
    fn clone(&self) -> Self {
        Self {
            gain: self.gain.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<G: Gain + 'static> Cache<G> {
    fn new(gain: G) -> Self {
        Self {
            gain: Rc::new(gain),
            cache: Rc::new(Default::default()),
        }
    }

    pub fn init(&self, geometry: &Geometry) -> Result<(), AUPAInternalError> {
        if self.cache.borrow().len() != geometry.devices().count()
            || geometry
                .devices()
                .any(|dev| !self.cache.borrow().contains_key(&dev.idx()))
        {
            tracing::debug!("computing {} for cache", tynm::type_name::<G>());
            *self.cache.borrow_mut() = self.gain.calc(geometry, GainFilter::All)?;
        }
        Ok(())
    }

    /// Get cached drives
    ///
    /// Empty until the first `calc`.
    pub fn drives(&self) -> Ref<'_, HashMap<usize, Vec<Drive>>> {
        self.cache.borrow()
    }
}

impl<G: Gain + 'static> Gain for Cache<G> {
    fn calc(
        &self,
        geometry: &Geometry,
        filter: GainFilter,
    ) -> Result<HashMap<usize, Vec<Drive>>, AUPAInternalError> {
        self.init(geometry)?;
        let cache = self.cache.borrow();
        Ok(match filter {
            GainFilter::All => cache.clone(),
            GainFilter::Filter(filter) => cache
                .iter()
                .map(|(&idx, drives)| {
                    let mask = filter.get(&idx);
                    (
                        idx,
                        drives
                            .iter()
                            .enumerate()
                            .map(|(i, &d)| {
                                if mask.and_then(|m| m.get(i)).unwrap_or(false) {
                                    d
                                } else {
                                    Drive::null()
                                }
                            })
                            .collect(),
                    )
                })
                .collect(),
        })
    }
}
