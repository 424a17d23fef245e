/// Concatenates string-like expressions into a new `String`.
#[macro_export]
macro_rules! concat_string {
  ($($s:expr),+ $(,)?) => {{
    let mut buf = ::std::string::String::new();
    $(buf.push_str(::core::convert::AsRef::<str>::as_ref(&$s));)+
    buf
  }};
}

#[test]
fn test_concat_string() {
  let name = String::from("foo");
  assert_eq!(concat_string!("./", name), "./foo");
  assert_eq!(concat_string!(name, "$", "1"), "foo$1");
}
