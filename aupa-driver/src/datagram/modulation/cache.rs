use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use crate::derive::*;

/// Modulation to cache the result of calculation
#[derive(Modulation)]
pub struct Cache<M: Modulation> {
    m: Rc<M>,
    cache: Rc<RefCell<Vec<f64>>>,
    #[no_change]
    config: SamplingConfig,
}

pub trait IntoCache<M: Modulation> {
    /// Cache the result of calculation
    fn with_cache(self) -> Cache<M>;
}

impl<M: Modulation> IntoCache<M> for M {
    fn with_cache(self) -> Cache<M> {
        Cache {
            config: self.sampling_config(),
            m: Rc::new(self),
            cache: Rc::new(Default::default()),
        }
    }
}

impl<M: Modulation> Clone for Cache<M> {
    fn clone(&self) -> Self {
        Self {
            m: self.m.clone(),
            cache: self.cache.clone(),
            config: self.config,
        }
    }
}

impl<M: Modulation> std::ops::Deref for Cache<M> {
    type Target = M;

    fn deref(&self) -> &Self::Target {
        &self.m
    }
}

impl<M: Modulation> Cache<M> {
    pub fn init(&self) -> Result<(), AUPAInternalError> {
        if self.cache.borrow().is_empty() {
            *self.cache.borrow_mut() = self.m.calc()?;
        }
        Ok(())
    }

    /// Get cached data
    ///
    /// Empty until the first `calc`.
    pub fn buffer(&self) -> Ref<'_, Vec<f64>> {
        self.cache.borrow()
    }
}

impl<M: Modulation> Modulation for Cache<M> {
    fn calc(&self) -> Result<Vec<f64>, AUPAInternalError> {
        self.init()?;
        Ok(self.cache.borrow().clone())
    }
}
