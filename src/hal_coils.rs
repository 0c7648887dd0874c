use crate::CoilDriver;
use embedded_hal::digital::v2::OutputPin;

/// A [`CoilDriver`] which drives four `embedded-hal` output pins.
///
/// `a` is coil line 0 (the least significant bit of each pattern) and `d` is
/// coil line 3.
///
/// Pin errors never interrupt the scheduler. The first error is kept until
/// it's collected with [`FourWire::take_error()`], and any later ones are
/// dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FourWire<A, B, C, D, E> {
    a: A,
    b: B,
    c: C,
    d: D,
    error: Option<E>,
}

impl<A, B, C, D, E> FourWire<A, B, C, D, E> {
    pub fn new(a: A, b: B, c: C, d: D) -> Self {
        FourWire {
            a,
            b,
            c,
            d,
            error: None,
        }
    }

    /// Get the first error encountered since the last call to
    /// [`FourWire::take_error()`].
    pub fn take_error(&mut self) -> Option<E> { self.error.take() }

    pub fn into_inner(self) -> (A, B, C, D) { (self.a, self.b, self.c, self.d) }
}

fn set_output<P: OutputPin>(pin: &mut P, mask: u8) -> Result<(), P::Error> {
    if mask != 0 {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

impl<A, B, C, D, E> FourWire<A, B, C, D, E>
where
    A: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
    C: OutputPin<Error = E>,
    D: OutputPin<Error = E>,
{
    fn set_outputs(&mut self, pattern: u8) -> Result<(), E> {
        set_output(&mut self.a, pattern & 0b0001)?;
        set_output(&mut self.b, pattern & 0b0010)?;
        set_output(&mut self.c, pattern & 0b0100)?;
        set_output(&mut self.d, pattern & 0b1000)?;

        Ok(())
    }
}

impl<A, B, C, D, E> CoilDriver for FourWire<A, B, C, D, E>
where
    A: OutputPin<Error = E>,
    B: OutputPin<Error = E>,
    C: OutputPin<Error = E>,
    D: OutputPin<Error = E>,
{
    #[inline]
    fn write(&mut self, pattern: u8) {
        if let Err(e) = self.set_outputs(pattern) {
            log::warn!("Unable to drive the coil lines for pattern {:#x}", pattern);

            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}
