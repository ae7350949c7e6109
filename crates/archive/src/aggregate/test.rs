use crate::{
    Archive, Category, Decode, Encode, category_of, chunk_decode, chunk_encode,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Entry {
    text: String,
    data: i32,
    scratch: Vec<u8>,
}

crate::aggregate!(Entry { text, data });

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Span(u32, u32);

crate::aggregate!(Span { 0, 1 });

#[derive(Debug, Default, PartialEq)]
struct Document {
    title: String,
    spans: Vec<Span>,
    entries: Vec<Entry>,
}

crate::aggregate!(Document { title, spans, entries });

#[derive(Debug, PartialEq, Encode, Decode)]
struct Derived {
    text: String,
    inner: (i32, i32),
    #[archive(skip)]
    cache: Vec<u8>,
}

#[derive(Debug, PartialEq, Encode, Decode)]
enum Shape {
    Empty,
    Circle(u32),
    Rect { width: u32, height: u32 },
}

#[test]
fn aggregate_category() {
    assert_eq!(category_of::<Entry>(), Category::Aggregate);
    assert_eq!(category_of::<Derived>(), Category::Aggregate);
    assert_eq!(category_of::<Shape>(), Category::Aggregate);
}

#[test]
fn declared_fields_only() {
    let value = Entry { text: "c-a".into(), data: 42, scratch: vec![1, 2] };

    let bytes = chunk_encode(&value).unwrap();
    // Prefix + 3 bytes of text + 4 bytes of data.
    assert_eq!(bytes.len(), 4 + 3 + 4);

    let decoded: Entry = chunk_decode(&bytes).unwrap();
    assert_eq!(decoded.text, "c-a");
    assert_eq!(decoded.data, 42);
    assert!(decoded.scratch.is_empty());
}

#[test]
fn decode_in_place_leaves_undeclared_fields() {
    let value = Entry { text: "abc".into(), data: 7, scratch: vec![] };

    let mut archive = Archive::new();
    archive.encode(&value).unwrap();

    let mut out = Entry { text: String::new(), data: 0, scratch: vec![9] };
    archive.decode(&mut out).unwrap();
    assert_eq!(out.text, "abc");
    assert_eq!(out.data, 7);
    assert_eq!(out.scratch, [9]);
}

#[test]
fn nested_aggregates() {
    let value = Document {
        title: "doc".into(),
        spans: vec![Span(0, 3), Span(4, 9)],
        entries: vec![
            Entry { text: "a".into(), data: -1, scratch: vec![] },
            Entry { text: "b".into(), data: i32::MAX, scratch: vec![] },
        ],
    };

    let bytes = chunk_encode(&value).unwrap();
    assert_eq!(chunk_decode::<Document>(&bytes).unwrap(), value);
}

#[test]
fn derived_struct_skips_marked_fields() {
    let value = Derived { text: "abc".into(), inner: (1, -2), cache: vec![3] };

    let bytes = chunk_encode(&value).unwrap();
    assert_eq!(bytes.len(), 4 + 3 + 4 + 4);

    let decoded: Derived = chunk_decode(&bytes).unwrap();
    assert_eq!(decoded.text, "abc");
    assert_eq!(decoded.inner, (1, -2));
    assert!(decoded.cache.is_empty());
}

#[test]
fn derived_enum_variants() {
    for value in [
        Shape::Empty,
        Shape::Circle(5),
        Shape::Rect { width: 2, height: 3 },
    ] {
        let bytes = chunk_encode(&value).unwrap();
        assert_eq!(chunk_decode::<Shape>(&bytes).unwrap(), value);
    }

    let bytes = chunk_encode(&Shape::Empty).unwrap();
    assert_eq!(bytes, 0u32.to_ne_bytes());
}

#[test]
fn derived_enum_rejects_unknown_variant() {
    let err = chunk_decode::<Shape>(&99u32.to_ne_bytes()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("invalid variant index"));
}
