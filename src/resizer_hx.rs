use std::borrow::Cow;
use std::ffi::CString;

use log::{error, info};
use steel::steel_vm::ffi::FFIValue;
use steel_derive::Steel;

use crate::encoding::EncodingContext;
use crate::logging;
use crate::resize::{ResizeOptions, try_resize, visible_len};
use crate::response::{error_response, success_response};

/// Column resizer handed to Steel, bound to one encoding context.
///
/// Calls from Steel never halt the editor: failures come back as error responses.
#[derive(Clone, Debug, Eq, Steel, PartialEq)]
pub(crate) struct Resizer {
    pub(crate) context: EncodingContext,
}

impl Resizer {
    pub(crate) fn new(logging_enabled: bool) -> Self {
        let log_level = if logging_enabled {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Off
        };
        logging::setup_logging(log_level).expect("Failed to initialize logging");

        let context = EncodingContext::from_env().unwrap_or_else(|e| {
            error!("{e}, falling back to the POSIX locale");
            EncodingContext::posix()
        });
        info!(
            "Resizer using locale {} ({})",
            context.locale(),
            context.encoding()
        );
        Self::with_context(context)
    }

    pub(crate) fn with_context(context: EncodingContext) -> Self {
        Resizer { context }
    }

    pub(crate) fn set_locale(&mut self, locale: &str) -> FFIValue {
        match EncodingContext::from_locale(locale) {
            Ok(context) => {
                self.context = context;
                success_response(std::iter::empty())
            }
            Err(e) => error_response("locale-error", &e.to_string()),
        }
    }

    pub(crate) fn encoding(&self) -> String {
        self.context.encoding().name().to_owned()
    }

    pub(crate) fn locale(&self) -> String {
        self.context.locale().to_owned()
    }

    pub(crate) fn visible_length(&self, text: &str) -> FFIValue {
        let input = match CString::new(text) {
            Ok(input) => input,
            Err(e) => return invalid_input(&e),
        };
        match visible_len(&self.context, &input) {
            Ok(len) => match isize::try_from(len) {
                Ok(len) => success_response([("length", FFIValue::IntV(len))]),
                Err(_) => error_response("invalid-input", "text is too long"),
            },
            Err(e) => error_response("encoding-error", &e.to_string()),
        }
    }

    pub(crate) fn resize(&self, text: &str, width: usize) -> FFIValue {
        let input = match CString::new(text) {
            Ok(input) => input,
            Err(e) => return invalid_input(&e),
        };
        let options = ResizeOptions {
            release_input: true,
            ..ResizeOptions::default()
        };

        match try_resize(&self.context, Cow::Owned(input), width, options) {
            Ok(resized) => match resized.into_text().into_owned().into_string() {
                Ok(text) => success_response([("text", FFIValue::StringV(text.into()))]),
                Err(e) => error_response(
                    "encoding-error",
                    &format!("resized text is not valid UTF-8: {}", e.utf8_error()),
                ),
            },
            Err(e) => {
                error!("Failed to resize {text:?} to {width}: {e}");
                error_response(e.kind(), &e.to_string())
            }
        }
    }
}

fn invalid_input(e: &std::ffi::NulError) -> FFIValue {
    error_response(
        "invalid-input",
        &format!("text contains a nul byte at offset {}", e.nul_position()),
    )
}
