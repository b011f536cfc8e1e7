// Copyright 2023 Google Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Little-endian binary encoding helpers shared by the encodable types.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::s2::error::{S2Error, S2Result};
use crate::s2::point::Point;

/// ENCODING_VERSION is the version tag written at the start of every
/// lossless encoding produced by this crate.
pub const ENCODING_VERSION: i8 = 1;

/// write_bool writes a single byte, 1 for true and 0 for false.
pub fn write_bool<W: Write>(w: &mut W, b: bool) -> S2Result<()> {
    w.write_u8(b as u8)?;
    Ok(())
}

/// write_u32 writes a fixed-width unsigned count.
pub fn write_u32<W: Write>(w: &mut W, n: u32) -> S2Result<()> {
    w.write_u32::<LittleEndian>(n)?;
    Ok(())
}

/// write_len writes a count as a fixed-width u32. Counts that do not fit
/// are rejected before anything is written.
pub fn write_len<W: Write>(w: &mut W, n: usize) -> S2Result<()> {
    let n = u32::try_from(n).map_err(|_| {
        S2Error::EncodingError(format!("count {} does not fit in 32 bits", n))
    })?;
    write_u32(w, n)
}

/// write_point writes the three coordinates of p.
pub fn write_point<W: Write>(w: &mut W, p: &Point) -> S2Result<()> {
    w.write_f64::<LittleEndian>(p.0.x)?;
    w.write_f64::<LittleEndian>(p.0.y)?;
    w.write_f64::<LittleEndian>(p.0.z)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_helpers() {
        let mut buf = Vec::new();
        write_bool(&mut buf, true).unwrap();
        write_bool(&mut buf, false).unwrap();
        write_u32(&mut buf, 0x01020304).unwrap();
        write_point(&mut buf, &Point::from_coords(0., 0., 1.)).unwrap();
        assert_eq!(&buf[..6], &[1, 0, 4, 3, 2, 1]);
        assert_eq!(buf.len(), 6 + 24);
        assert_eq!(&buf[22..30], &1f64.to_le_bytes());
    }

    #[test]
    fn test_write_len() {
        let mut buf = Vec::new();
        write_len(&mut buf, 7).unwrap();
        write_len(&mut buf, u32::MAX as usize).unwrap();
        assert_eq!(&buf[..4], &7u32.to_le_bytes());
        assert_eq!(&buf[4..], &u32::MAX.to_le_bytes());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_write_len_overflow() {
        let mut buf = Vec::new();
        let err = write_len(&mut buf, u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, S2Error::EncodingError(_)));
        assert!(buf.is_empty());
    }
}
