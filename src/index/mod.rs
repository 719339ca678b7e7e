mod bits;
mod codec;
pub mod constants;
mod grid;

pub use bits::{compact, deinterleave, interleave, spread};
pub use codec::{decode, decode_many, encode, encode_many, encode_with, try_encode, try_encode_many};
pub use constants::{
    GRID_BITS, GRID_SIZE, LATITUDE_RANGE, LONGITUDE_RANGE, MAX_GRID_NUMBER, MAX_LATITUDE,
    MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE, SCORE_MASK,
};
pub use grid::{DomainPolicy, GridCoordinate, cell_size};
