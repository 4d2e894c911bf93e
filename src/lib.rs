use steel::{
    declare_module,
    steel_vm::ffi::{FFIModule, RegisterFFIFn},
};

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod encoding;
pub mod error;
mod logging;
pub mod resize;
mod resizer_hx;
mod response;

pub use encoding::{Encoding, EncodingContext};
pub use error::{EncodingError, LocaleError, ResizeError};
pub use resize::{ResizeOptions, ResizePath, Resized, resize, try_resize, visible_len};

declare_module!(create_module);

fn create_module() -> FFIModule {
    let mut module = FFIModule::new("steel/utf8-resize");

    module
        .register_fn("Resizer-new", resizer_hx::Resizer::new)
        .register_fn("Resizer-set-locale", resizer_hx::Resizer::set_locale)
        .register_fn("Resizer-encoding", resizer_hx::Resizer::encoding)
        .register_fn("Resizer-locale", resizer_hx::Resizer::locale)
        .register_fn(
            "Resizer-visible-length",
            resizer_hx::Resizer::visible_length,
        )
        .register_fn("Resizer-resize", resizer_hx::Resizer::resize);

    module
}
