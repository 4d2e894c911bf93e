use std::ffi::CStr;

use crate::encoding::EncodingContext;

/// Codepoint count of a result, measured with the same context that produced it.
#[cfg(test)]
pub fn codepoints(ctx: &EncodingContext, text: &CStr) -> usize {
    ctx.count_codepoints(text.to_bytes())
        .unwrap_or_else(|e| panic!("Result {text:?} is not decodable: {e}"))
}

#[cfg(test)]
macro_rules! assert_resized {
    ($ctx:expr, $input:expr, $target_len:expr => $expected:expr $(,)?) => {{
        let ctx: &$crate::encoding::EncodingContext = $ctx;
        let input: &std::ffi::CStr = $input;
        let expected: &std::ffi::CStr = $expected;

        let resized = $crate::resize::resize(
            ctx,
            std::borrow::Cow::Borrowed(input),
            $target_len,
            $crate::resize::ResizeOptions::default(),
        );

        assert_eq!(
            resized.text(),
            expected,
            "Resizing {:?} to {} codepoints\nExpected lossy:\n{:?}\nActual lossy:\n{:?}\n",
            input,
            $target_len,
            String::from_utf8_lossy(expected.to_bytes()),
            String::from_utf8_lossy(resized.text().to_bytes()),
        );
        assert_eq!(
            $crate::test_utils::codepoints(ctx, resized.text()),
            $target_len,
            "Codepoint count mismatch for {:?}",
            input,
        );
    }};
}

#[cfg(test)]
macro_rules! response_field {
    ($response:expr, $key:expr) => {{
        match &$response {
            steel::steel_vm::ffi::FFIValue::HashMap(map) => {
                map.get(&steel::steel_vm::ffi::FFIValue::StringV($key.into()))
            }
            _ => panic!("Expected a response map"),
        }
    }};
}

#[cfg(test)]
macro_rules! create_test_dir {
    () => {{
        use tempfile::TempDir;
        TempDir::new().unwrap()
    }};
}
