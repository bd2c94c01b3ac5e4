//! Phase-typed wrappers around [`Sponge`].
//!
//! [`Absorber::finalize`] consumes the absorbing half and hands back a
//! [`Squeezer`], so absorbing after finalization or squeezing before it does
//! not type-check. Nothing here can fail at runtime.

use std::io;

use crate::sponge::Sponge;

#[derive(Clone, Debug, Default)]
pub struct Absorber {
    sponge: Sponge,
}

impl Absorber {
    pub fn new() -> Self { Self::default() }

    pub fn absorb(&mut self, data: &[u8]) -> &mut Self {
        self.sponge.absorb_unchecked(data);
        self
    }

    pub fn finalize(mut self) -> Squeezer {
        self.sponge.finalize_unchecked();
        Squeezer {
            sponge: self.sponge,
        }
    }
}

impl io::Write for Absorber {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sponge.absorb_unchecked(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl From<Absorber> for Sponge {
    fn from(absorber: Absorber) -> Self { absorber.sponge }
}

#[derive(Clone, Debug)]
pub struct Squeezer {
    sponge: Sponge,
}

impl Squeezer {
    pub fn squeeze(&mut self, length: usize) -> Vec<u8> {
        let mut out = vec![0; length];
        self.sponge.squeeze_unchecked(&mut out);
        out
    }

    pub fn squeeze_into(&mut self, out: &mut [u8]) { self.sponge.squeeze_unchecked(out); }

    /// Wipes the state and starts a new absorbing cycle.
    pub fn reset(self) -> Absorber {
        let mut sponge = self.sponge;
        sponge.reset();
        Absorber { sponge }
    }
}

impl From<Squeezer> for Sponge {
    fn from(squeezer: Squeezer) -> Self { squeezer.sponge }
}

#[cfg(feature = "digest")]
mod rustcrypto {
    use digest::{ExtendableOutput, Reset, Update, XofReader};

    use super::{Absorber, Squeezer};

    impl Update for Absorber {
        fn update(&mut self, data: &[u8]) { self.sponge.absorb_unchecked(data); }
    }

    impl Reset for Absorber {
        fn reset(&mut self) { self.sponge.reset(); }
    }

    impl ExtendableOutput for Absorber {
        type Reader = Squeezer;

        fn finalize_xof(self) -> Squeezer { self.finalize() }
    }

    impl XofReader for Squeezer {
        fn read(&mut self, buffer: &mut [u8]) { self.squeeze_into(buffer); }
    }
}
