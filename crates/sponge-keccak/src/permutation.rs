//! Keccak-f\[1600\] over 25 little-endian lanes indexed `x + 5 * y`.

pub const LANES: usize = 25;
pub const ROUNDS: usize = 24;

const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

// Rotation applied to the lane that lands on PI_LANES[i].
const ROTATION_OFFSETS: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

// The pi cycle starting from lane 1.
const PI_LANES: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Applies all 24 rounds in place.
pub fn keccak_f1600(lanes: &mut [u64; LANES]) {
    for rc in ROUND_CONSTANTS {
        round(lanes, rc);
    }
}

fn round(a: &mut [u64; LANES], rc: u64) {
    theta(a);
    rho_pi(a);
    chi(a);
    a[0] ^= rc;
}

fn theta(a: &mut [u64; LANES]) {
    let mut parity = [0u64; 5];
    for (x, p) in parity.iter_mut().enumerate() {
        *p = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
    }

    for x in 0..5 {
        let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
        for y in (0..LANES).step_by(5) {
            a[y + x] ^= d;
        }
    }
}

fn rho_pi(a: &mut [u64; LANES]) {
    let mut carry = a[1];
    for (&dst, &rot) in PI_LANES.iter().zip(ROTATION_OFFSETS.iter()) {
        let next = a[dst];
        a[dst] = carry.rotate_left(rot);
        carry = next;
    }
}

fn chi(a: &mut [u64; LANES]) {
    for y in (0..LANES).step_by(5) {
        let row = [a[y], a[y + 1], a[y + 2], a[y + 3], a[y + 4]];
        for x in 0..5 {
            a[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
        }
    }
}
