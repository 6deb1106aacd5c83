use inject::{Container, InjectError};

/// Groups related `provide` calls into a reusable unit.
pub trait BundleExt {
    fn add_bundle<F>(&mut self, func: F) -> Result<&mut Self, InjectError>
    where
        F: FnOnce(&mut Self) -> Result<(), InjectError>,
        Self: Sized;
}

impl BundleExt for Container {
    fn add_bundle<F>(&mut self, func: F) -> Result<&mut Self, InjectError>
    where
        F: FnOnce(&mut Self) -> Result<(), InjectError>,
        Self: Sized,
    {
        func(self)?;
        Ok(self)
    }
}
