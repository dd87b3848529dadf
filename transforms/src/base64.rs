// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Resumable base64 stream codec.
//!
//! [`Base64StreamCodec`] converts between raw bytes and base64 text one block
//! at a time. Partial blocks survive across calls, so callers may feed input
//! and drain output in chunks of any size:
//!
//! ```
//! use dsig_transforms::base64::Base64StreamCodec;
//!
//! # fn example() -> dsig_transforms::Result<()> {
//! let mut codec = Base64StreamCodec::encoder(0);
//! let mut out = [0u8; 16];
//! let mut n = codec.update(b"Hel", &mut out)?;
//! n += codec.update(b"lo", &mut out[n..])?;
//! n += codec.finalize(&mut out[n..])?;
//! assert_eq!(&out[..n], b"SGVsbG8=");
//! # Ok(())
//! # }
//! ```

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{CodecError, Error, Result};

/// Default line width used when wrapping encoded output
pub const LINE_SIZE: usize = 64;

const ENCODE_BLOCK_SIZE: usize = 3;
const DECODE_BLOCK_SIZE: usize = 4;
const OUTPUT_STAGE_SIZE: usize = 16;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Direction of a codec, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Raw bytes in, base64 text out
    Encode,
    /// Base64 text in, raw bytes out
    Decode,
}

/// Incremental base64 encoder/decoder.
#[derive(Debug, Clone)]
pub struct Base64StreamCodec {
    mode: Mode,
    /// Raw bytes (encode) or six-bit symbol values (decode) waiting for a block
    input: [u8; DECODE_BLOCK_SIZE],
    in_pos: usize,
    output: [u8; OUTPUT_STAGE_SIZE],
    out_pos: usize,
    columns: usize,
    line_pos: usize,
    equal_signs: usize,
    failed: bool,
}

impl Base64StreamCodec {
    /// Create a codec. `columns` is the wrap width for encoding, 0 disables
    /// wrapping and decoding ignores it.
    pub fn new(mode: Mode, columns: usize) -> Self {
        Self {
            mode,
            input: [0; DECODE_BLOCK_SIZE],
            in_pos: 0,
            output: [0; OUTPUT_STAGE_SIZE],
            out_pos: 0,
            columns,
            line_pos: 0,
            equal_signs: 0,
            failed: false,
        }
    }

    /// Create an encoder wrapping lines at `columns` characters.
    pub fn encoder(columns: usize) -> Self {
        Self::new(Mode::Encode, columns)
    }

    /// Create a decoder.
    pub fn decoder() -> Self {
        Self::new(Mode::Decode, 0)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether a previous error has poisoned this codec.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Whether staged input or output is still waiting to be drained.
    pub fn has_pending(&self) -> bool {
        self.in_pos > 0 || self.out_pos > 0
    }

    fn block_size(&self) -> usize {
        match self.mode {
            Mode::Encode => ENCODE_BLOCK_SIZE,
            Mode::Decode => DECODE_BLOCK_SIZE,
        }
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.failed {
            return Err(CodecError::StreamFailed.into());
        }
        Ok(())
    }

    fn track<T>(&mut self, res: Result<T>) -> Result<T> {
        if let Err(ref e) = res {
            log::error!("base64 codec failed: {}", e);
            self.failed = true;
        }
        res
    }

    /// Stage input bytes, returning how many were consumed.
    ///
    /// At most one block is staged per call; whitespace skipped while
    /// decoding counts as consumed.
    pub fn push(&mut self, input: &[u8]) -> Result<usize> {
        self.ensure_usable()?;
        match self.mode {
            Mode::Encode => Ok(self.push_raw(input)),
            Mode::Decode => {
                let res = self.push_encoded(input);
                self.track(res)
            }
        }
    }

    fn push_raw(&mut self, input: &[u8]) -> usize {
        let count = (ENCODE_BLOCK_SIZE - self.in_pos).min(input.len());
        self.input[self.in_pos..self.in_pos + count].copy_from_slice(&input[..count]);
        self.in_pos += count;
        count
    }

    fn push_encoded(&mut self, input: &[u8]) -> Result<usize> {
        let mut consumed = 0;
        while consumed < input.len() && self.in_pos < DECODE_BLOCK_SIZE {
            let ch = input[consumed];
            if self.equal_signs > 0 {
                if ch == b'=' {
                    if self.equal_signs >= 2 {
                        return Err(CodecError::TooManyPaddingChars.into());
                    }
                    self.equal_signs += 1;
                } else if !is_space(ch) {
                    return Err(CodecError::InvalidCharacterAfterPadding(ch).into());
                }
            } else if let Some(value) = symbol_value(ch) {
                self.input[self.in_pos] = value;
                self.in_pos += 1;
            } else if ch == b'=' {
                self.equal_signs = 1;
            } else if !is_space(ch) {
                return Err(CodecError::InvalidBase64Character(ch).into());
            }
            consumed += 1;
        }
        Ok(consumed)
    }

    /// Move available output into `output`, returning the byte count.
    ///
    /// A block is converted only when nothing is left in the output stage and
    /// either the input stage is full or `is_final` is set.
    pub fn pop(&mut self, output: &mut [u8], is_final: bool) -> Result<usize> {
        self.ensure_usable()?;
        if self.out_pos == 0 && (self.in_pos >= self.block_size() || is_final) {
            let res = match self.mode {
                Mode::Encode => {
                    self.encode_block();
                    Ok(())
                }
                Mode::Decode => self.decode_block(),
            };
            self.track(res)?;
        }

        let count = self.out_pos.min(output.len());
        output[..count].copy_from_slice(&self.output[..count]);
        self.output.copy_within(count..self.out_pos, 0);
        self.out_pos -= count;
        Ok(count)
    }

    fn encode_block(&mut self) {
        if self.in_pos == 0 {
            return;
        }
        log::trace!("base64: encoding block of {} bytes", self.in_pos);

        let b0 = self.input[0];
        let b1 = if self.in_pos > 1 { self.input[1] } else { 0 };
        let b2 = if self.in_pos > 2 { self.input[2] } else { 0 };

        let symbols = [
            ALPHABET[(b0 >> 2) as usize],
            ALPHABET[(((b0 & 0x03) << 4) | (b1 >> 4)) as usize],
            if self.in_pos > 1 {
                ALPHABET[(((b1 & 0x0f) << 2) | (b2 >> 6)) as usize]
            } else {
                b'='
            },
            if self.in_pos > 2 {
                ALPHABET[(b2 & 0x3f) as usize]
            } else {
                b'='
            },
        ];
        // Wrapping is decided per character, not per block.
        for ch in symbols {
            if self.columns > 0 && self.line_pos >= self.columns {
                self.stage(b'\n');
                self.line_pos = 0;
            }
            self.line_pos += 1;
            self.stage(ch);
        }
        self.in_pos = 0;
    }

    fn decode_block(&mut self) -> Result<()> {
        match self.in_pos {
            0 => return Ok(()),
            1 => {
                return Err(Error::invalid_data(
                    "at least two base64 symbols are required",
                ))
            }
            _ => {}
        }
        log::trace!("base64: decoding block of {} symbols", self.in_pos);

        let s = self.input;
        self.stage((s[0] << 2) | (s[1] >> 4));
        if self.in_pos > 2 {
            self.stage((s[1] << 4) | (s[2] >> 2));
        }
        if self.in_pos > 3 {
            self.stage((s[2] << 6) | s[3]);
        }
        self.in_pos = 0;
        Ok(())
    }

    fn stage(&mut self, byte: u8) {
        self.output[self.out_pos] = byte;
        self.out_pos += 1;
    }

    /// Convert as much of `input` as fits into `output`.
    ///
    /// Returns the number of bytes written. If `output` fills up before all
    /// of `input` is consumed the stream fails with `BufferTooSmall`.
    pub fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        self.ensure_usable()?;
        let mut in_off = 0;
        let mut out_off = 0;
        while in_off < input.len() && out_off < output.len() {
            let consumed = self.push(&input[in_off..])?;
            in_off += consumed;
            let produced = self.pop(&mut output[out_off..], false)?;
            out_off += produced;
            if consumed == 0 && produced == 0 {
                break;
            }
        }

        if in_off < input.len() {
            let res = Err(CodecError::BufferTooSmall {
                available: output.len(),
            }
            .into());
            return self.track(res);
        }
        Ok(out_off)
    }

    /// Flush the final, possibly partial, block into `output`.
    pub fn finalize(&mut self, output: &mut [u8]) -> Result<usize> {
        self.ensure_usable()?;
        let mut written = 0;
        loop {
            let produced = self.pop(&mut output[written..], true)?;
            if produced == 0 {
                break;
            }
            written += produced;
        }

        if self.has_pending() {
            let res = Err(CodecError::BufferTooSmall {
                available: output.len(),
            }
            .into());
            return self.track(res);
        }
        Ok(written)
    }
}

fn symbol_value(ch: u8) -> Option<u8> {
    match ch {
        b'A'..=b'Z' => Some(ch - b'A'),
        b'a'..=b'z' => Some(ch - b'a' + 26),
        b'0'..=b'9' => Some(ch - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}

fn is_space(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\r' | b'\n')
}

/// Encode `data` in one shot, wrapping lines at `columns` (0 = no wrapping).
pub fn encode(data: &[u8], columns: usize) -> Result<String> {
    let mut size = 4 * data.len() / 3 + 4;
    if columns > 0 {
        size += size / columns + 4;
    }
    let mut out = alloc::vec![0u8; size];

    let mut codec = Base64StreamCodec::encoder(columns);
    let mut len = codec.update(data, &mut out)?;
    len += codec.finalize(&mut out[len..])?;
    out.truncate(len);

    Ok(out.into_iter().map(char::from).collect())
}

/// Decode base64 text in one shot. Whitespace is ignored.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let input = text.as_bytes();
    let mut out = alloc::vec![0u8; 3 * input.len() / 4 + 4];

    let mut codec = Base64StreamCodec::decoder();
    let mut len = codec.update(input, &mut out)?;
    len += codec.finalize(&mut out[len..])?;
    out.truncate(len);
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
