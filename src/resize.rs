//! Fixed-width columns measured in codepoints.
//!
//! `printf`-style width specifiers count bytes, which misaligns columns as soon as a cell
//! contains multi-byte characters. [`resize`] truncates or space-pads a string so that it
//! holds exactly the requested number of codepoints under an [`EncodingContext`].

use std::borrow::Cow;
use std::ffi::{CStr, CString};

use log::{debug, error, trace};

use crate::encoding::EncodingContext;
use crate::error::{EncodingError, ResizeError};

const PAD_BYTE: u8 = b' ';

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResizeOptions {
    /// Drop the input whenever a new buffer is produced.
    pub release_input: bool,
    /// Copy the input even if it already has the target length.
    pub always_duplicate: bool,
    /// Also honor `release_input` when `always_duplicate` copies an exact-length input.
    pub release_on_duplicate: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResizePath {
    Truncated,
    Padded,
    Aliased,
    Duplicated,
}

impl ResizePath {
    fn name(self) -> &'static str {
        match self {
            ResizePath::Truncated => "truncated",
            ResizePath::Padded => "padded",
            ResizePath::Aliased => "aliased",
            ResizePath::Duplicated => "duplicated",
        }
    }
}

#[derive(Debug)]
pub struct Resized<'a> {
    text: Cow<'a, CStr>,
    retained: Option<Cow<'a, CStr>>,
    path: ResizePath,
}

impl<'a> Resized<'a> {
    pub fn text(&self) -> &CStr {
        &self.text
    }

    pub fn into_text(self) -> Cow<'a, CStr> {
        self.text
    }

    /// The input, handed back when it was neither released nor returned as the result.
    pub fn retained(&self) -> Option<&CStr> {
        self.retained.as_deref()
    }

    pub fn path(&self) -> ResizePath {
        self.path
    }

    pub fn into_parts(self) -> (Cow<'a, CStr>, Option<Cow<'a, CStr>>) {
        (self.text, self.retained)
    }
}

pub fn visible_len(ctx: &EncodingContext, text: &CStr) -> Result<usize, EncodingError> {
    ctx.count_codepoints(text.to_bytes())
}

/// Resizes `input` to exactly `target_len` codepoints, halting on failure.
///
/// Invalid input bytes and allocation failures are treated as broken preconditions: the
/// error is logged and the calling thread panics. Use [`try_resize`] to get the error back
/// instead.
pub fn resize<'a>(
    ctx: &EncodingContext,
    input: Cow<'a, CStr>,
    target_len: usize,
    options: ResizeOptions,
) -> Resized<'a> {
    match try_resize(ctx, input, target_len, options) {
        Ok(resized) => resized,
        Err(e) => {
            error!("Resize to {target_len} codepoints failed: {e}");
            panic!("resize to {target_len} codepoints failed: {e}");
        }
    }
}

/// Resizes `input` to exactly `target_len` codepoints.
///
/// * fewer codepoints than `input`: the first `target_len` codepoints are decoded and
///   re-encoded into a new buffer;
/// * same count: `input` itself is returned, or a copy if `always_duplicate` is set;
/// * more codepoints: `input` followed by ASCII spaces.
///
/// A borrowed input is never released. On error the input is dropped.
pub fn try_resize<'a>(
    ctx: &EncodingContext,
    input: Cow<'a, CStr>,
    target_len: usize,
    options: ResizeOptions,
) -> Result<Resized<'a>, ResizeError> {
    let visible_len = visible_len(ctx, &input)?;

    let resized = if target_len < visible_len {
        let text = truncate(ctx, &input, target_len)?;
        Resized {
            text: Cow::Owned(text),
            retained: retain(input, options.release_input),
            path: ResizePath::Truncated,
        }
    } else if target_len == visible_len {
        if options.always_duplicate {
            let text = duplicate(&input)?;
            if options.release_input && !options.release_on_duplicate {
                debug!("release_input ignored for exact-length duplicate");
            }
            Resized {
                text: Cow::Owned(text),
                retained: retain(input, options.release_input && options.release_on_duplicate),
                path: ResizePath::Duplicated,
            }
        } else {
            Resized {
                text: input,
                retained: None,
                path: ResizePath::Aliased,
            }
        }
    } else {
        let (text, retained) = pad(input, target_len - visible_len, options.release_input)?;
        Resized {
            text: Cow::Owned(text),
            retained,
            path: ResizePath::Padded,
        }
    };

    trace!(
        "Resized {visible_len} -> {target_len} codepoints ({path}, {encoding})",
        path = resized.path.name(),
        encoding = ctx.encoding(),
    );

    Ok(resized)
}

fn retain(input: Cow<'_, CStr>, release: bool) -> Option<Cow<'_, CStr>> {
    if release {
        drop(input);
        None
    } else {
        Some(input)
    }
}

fn truncate(ctx: &EncodingContext, input: &CStr, target_len: usize) -> Result<CString, ResizeError> {
    let chars = ctx.decode_prefix(input.to_bytes(), target_len)?;

    // Measure first so the buffer is allocated exactly once at its final size
    let byte_len = ctx.encoded_len(&chars)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(byte_len.saturating_add(1))?;
    ctx.encode_into(&chars, &mut buf)?;
    buf.push(0);

    into_c_string(buf)
}

fn duplicate(input: &CStr) -> Result<CString, ResizeError> {
    let bytes = input.to_bytes_with_nul();
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())?;
    buf.extend_from_slice(bytes);
    into_c_string(buf)
}

fn pad<'a>(
    input: Cow<'a, CStr>,
    pad: usize,
    release_input: bool,
) -> Result<(CString, Option<Cow<'a, CStr>>), ResizeError> {
    let bytes = input.to_bytes();
    let byte_len = bytes.len();

    // An overflowing size surfaces as a capacity error from `try_reserve_exact`
    let mut buf = Vec::new();
    buf.try_reserve_exact(byte_len.saturating_add(pad).saturating_add(1))?;
    buf.extend_from_slice(bytes);

    let retained = retain(input, release_input);

    buf.resize(byte_len + pad, PAD_BYTE);
    buf.push(0);

    Ok((into_c_string(buf)?, retained))
}

fn into_c_string(buf: Vec<u8>) -> Result<CString, ResizeError> {
    CString::from_vec_with_nul(buf).map_err(|e| {
        let offset = e
            .as_bytes()
            .iter()
            .position(|&b| b == 0)
            .unwrap_or_default();
        ResizeError::Encoding(EncodingError::InteriorNul { offset })
    })
}
