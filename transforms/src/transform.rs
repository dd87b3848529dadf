// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Transform stages driven by a document-signature pipeline.

extern crate alloc;

use alloc::vec::Vec;

use crate::base64::{Base64StreamCodec, Mode, LINE_SIZE};
use crate::error::{Error, Result};

/// Input is fed to the codec in chunks of this many bytes.
const CHUNK_SIZE: usize = 64;

/// Lifecycle state of a transform, observable by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformStatus {
    #[default]
    Unstarted,
    Working,
    Finished,
    Failed,
}

/// A single stage of a transform pipeline.
pub trait Transform {
    /// Short name of the transform (e.g. "base64")
    fn name(&self) -> &'static str;

    /// Algorithm URI identifying the transform
    fn uri(&self) -> &'static str;

    fn status(&self) -> TransformStatus;

    /// Process `input`, appending any produced bytes to `output`.
    ///
    /// `last` marks the end of the input stream; the transform flushes its
    /// state and moves to [`TransformStatus::Finished`].
    fn execute(&mut self, input: &[u8], last: bool, output: &mut Vec<u8>) -> Result<()>;
}

/// Check the status before handling more input and move `Unstarted` to
/// `Working`.
pub(crate) fn begin_execute(status: &mut TransformStatus, input: &[u8]) -> Result<()> {
    match *status {
        TransformStatus::Unstarted => {
            *status = TransformStatus::Working;
            Ok(())
        }
        TransformStatus::Working => Ok(()),
        TransformStatus::Finished if input.is_empty() => Ok(()),
        TransformStatus::Finished | TransformStatus::Failed => {
            log::error!("transform executed in status {:?}", status);
            Err(Error::invalid_status(*status))
        }
    }
}

/// Base64 encode/decode transform
#[derive(Debug, Clone)]
pub struct Base64Transform {
    codec: Base64StreamCodec,
    status: TransformStatus,
}

impl Base64Transform {
    pub const NAME: &'static str = "base64";
    pub const URI: &'static str = "http://www.w3.org/2000/09/xmldsig#base64";

    /// Encoder wrapping output at [`LINE_SIZE`] columns.
    pub fn encoder() -> Self {
        Self::with_columns(LINE_SIZE)
    }

    /// Encoder wrapping output at `columns` (0 disables wrapping).
    pub fn with_columns(columns: usize) -> Self {
        Self {
            codec: Base64StreamCodec::new(Mode::Encode, columns),
            status: TransformStatus::Unstarted,
        }
    }

    pub fn decoder() -> Self {
        Self {
            codec: Base64StreamCodec::decoder(),
            status: TransformStatus::Unstarted,
        }
    }

    pub fn mode(&self) -> Mode {
        self.codec.mode()
    }

    fn run(&mut self, input: &[u8], last: bool, output: &mut Vec<u8>) -> Result<()> {
        // Enough for one chunk plus the codec's staged block and line breaks.
        let mut buf = [0u8; 3 * CHUNK_SIZE];
        for chunk in input.chunks(CHUNK_SIZE) {
            let n = self.codec.update(chunk, &mut buf)?;
            output.extend_from_slice(&buf[..n]);
        }
        if last {
            let n = self.codec.finalize(&mut buf)?;
            output.extend_from_slice(&buf[..n]);
        }
        Ok(())
    }
}

impl Transform for Base64Transform {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn uri(&self) -> &'static str {
        Self::URI
    }

    fn status(&self) -> TransformStatus {
        self.status
    }

    fn execute(&mut self, input: &[u8], last: bool, output: &mut Vec<u8>) -> Result<()> {
        begin_execute(&mut self.status, input)?;
        if self.status == TransformStatus::Finished {
            return Ok(());
        }

        match self.run(input, last, output) {
            Ok(()) => {
                if last {
                    self.status = TransformStatus::Finished;
                }
                Ok(())
            }
            Err(e) => {
                self.status = TransformStatus::Failed;
                Err(e)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
