/// An interface to the four coil lines of a gauge stepper.
///
/// Bit `n` of `pattern` is the level coil line `n` should be driven to. Only
/// the lowest 4 bits are ever set.
///
/// Writing can't fail as far as the scheduler is concerned. If the
/// underlying lines can, it's up to the implementation to keep track of it
/// (see [`FourWire::take_error()`](crate::FourWire) with the `hal` feature).
pub trait CoilDriver {
    fn write(&mut self, pattern: u8);
}

impl<'a, C: CoilDriver> CoilDriver for &'a mut C {
    fn write(&mut self, pattern: u8) { (*self).write(pattern); }
}

/// A [`CoilDriver`] which hands every pattern to a callback.
pub fn func_coils<F>(write: F) -> impl CoilDriver
where
    F: FnMut(u8),
{
    FuncCoils { write }
}

struct FuncCoils<F> {
    write: F,
}

impl<F> CoilDriver for FuncCoils<F>
where
    F: FnMut(u8),
{
    #[inline]
    fn write(&mut self, pattern: u8) { (self.write)(pattern); }
}
