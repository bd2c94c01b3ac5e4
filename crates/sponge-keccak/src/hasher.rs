use crate::typestate::Absorber;

/// Output length used when none is configured: the full 512-bit security level.
pub const DEFAULT_OUTPUT_LEN: usize = 64;

pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

/// [`Hasher`] over the Keccak sponge with an output length fixed up front.
#[derive(Clone, Debug)]
pub struct KeccakHasher {
    absorber:   Absorber,
    output_len: usize,
}

impl Default for KeccakHasher {
    fn default() -> Self { Self::new(DEFAULT_OUTPUT_LEN) }
}

impl KeccakHasher {
    pub fn new(output_len: usize) -> Self {
        Self {
            absorber: Absorber::new(),
            output_len,
        }
    }

    pub fn output_len(&self) -> usize { self.output_len }

    pub fn digest(data: &[u8], output_len: usize) -> Vec<u8> { crate::hash_bytes(data, output_len) }
}

impl Hasher for KeccakHasher {
    fn update(&mut self, data: &[u8]) { self.absorber.absorb(data); }

    fn finalize(self) -> Vec<u8> { self.absorber.finalize().squeeze(self.output_len) }
}
