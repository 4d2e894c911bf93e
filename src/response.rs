use abi_stable::std_types::RHashMap;
use steel::steel_vm::ffi::FFIValue;

pub(crate) fn success_response<I>(fields: I) -> FFIValue
where
    I: IntoIterator<Item = (&'static str, FFIValue)>,
{
    let mut map = RHashMap::new();
    map.insert(FFIValue::StringV("success".into()), FFIValue::BoolV(true));
    for (key, value) in fields {
        map.insert(FFIValue::StringV(key.into()), value);
    }
    FFIValue::HashMap(map)
}

pub(crate) fn error_response(error_type: &str, message: &str) -> FFIValue {
    let mut map = RHashMap::new();
    map.insert(FFIValue::StringV("success".into()), FFIValue::BoolV(false));
    map.insert(
        FFIValue::StringV("error-type".into()),
        FFIValue::StringV(error_type.into()),
    );
    map.insert(
        FFIValue::StringV("message".into()),
        FFIValue::StringV(message.into()),
    );
    FFIValue::HashMap(map)
}
