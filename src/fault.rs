//! Fault indicator for fatal servo errors.
//!
//! The core never hangs on a fatal error: it returns it. A supervisor can
//! route every result through a [`FaultIndicator`] to light a status pin
//! when a fatal error surfaces, then stop ticking the bank.

use embedded_hal::digital::OutputPin;

use crate::error::{Error, Result, ServoError};

/// Status output driven high while a fatal error is outstanding.
pub struct FaultIndicator<P>
where
    P: OutputPin,
{
    pin: P,
    raised: bool,
}

impl<P> FaultIndicator<P>
where
    P: OutputPin,
{
    /// Wrap a pin; the indicator starts cleared and the pin is left as is.
    pub fn new(pin: P) -> Self {
        Self { pin, raised: false }
    }

    /// Whether a fault is currently signalled.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised
    }

    /// Signal a fault.
    pub fn raise(&mut self, error: &Error) -> Result<()> {
        #[cfg(feature = "defmt")]
        defmt::error!("fatal: {}", defmt::Display2Format(error));
        #[cfg(not(feature = "defmt"))]
        let _ = error;

        self.pin.set_high().map_err(|_| ServoError::PinError)?;
        self.raised = true;
        Ok(())
    }

    /// Clear a signalled fault.
    pub fn clear(&mut self) -> Result<()> {
        self.pin.set_low().map_err(|_| ServoError::PinError)?;
        self.raised = false;
        Ok(())
    }

    /// Pass a result through, raising the indicator if it holds a fatal error.
    ///
    /// The original error is returned even if driving the pin fails.
    pub fn check<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref error) = result {
            if error.is_fatal() {
                let _ = self.raise(error);
            }
        }
        result
    }

    /// Give back the pin.
    pub fn release(self) -> P {
        self.pin
    }
}
