#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonpeek::{
    Kind, Reader, ReaderOptions, get_kind_strict, is_json, merge_json, new_reader, validate,
};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // 1 flag byte

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Whitespace the grammar accepts, plus bytes it must reject between tokens.
static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    b"\x0c",
    b"\x0b",
    "\u{00A0}".as_bytes(),
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);

        let mut prefix = HEADER;
        let limit = max_size - prefix;
        prefix += append_whitespace(&mut data[prefix..], limit);
        let limit = max_size - prefix;
        prefix += append_value(&mut data[prefix..], size.max(8), limit);
        let limit = max_size - prefix;
        prefix += append_whitespace(&mut data[prefix..], limit);
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 1‒N whitespace code-points (N chosen randomly) to `buf`,
/// but never exceed `limit`.  Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let n_codepoints = rng.random_range(1..=limit.min(4));
        let mut written = 0;

        for _ in 0..n_codepoints {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(u.arbitrary::<i64>()?.into()),
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Every accessor on every node must return without panicking, and every
/// node must re-parse from its own raw span to the same kind and size.
fn check_tree(r: &Reader<'_>) {
    let _ = (r.as_string(), r.as_int(), r.as_float(), r.as_bool(), r.as_bytes());
    let _ = (r.as_int_slice(), r.as_map_string_bool(), r.as_value());

    let reparsed = new_reader(r.raw()).expect("raw span re-parses");
    assert_eq!(reparsed.kind(), r.kind());
    assert_eq!(reparsed.len(), r.len());
    assert_eq!(r.keys().len(), r.len());

    for child in r.elements() {
        check_tree(&child);
    }
}

fn reader(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let data = &data[HEADER..];

    let reader = new_reader(data);
    assert_eq!(is_json(data), reader.is_ok());

    if serde_json::from_slice::<Value>(data).is_ok() {
        assert!(is_json(data), "serde_json accepts what we reject");
    }

    let options = ReaderOptions {
        max_depth: usize::from(flags) + 1,
    };
    assert_eq!(
        validate(data, &options).is_ok(),
        Reader::with_options(data, options).is_ok()
    );

    let Ok(reader) = reader else {
        return;
    };
    assert_eq!(reader.kind(), get_kind_strict(data, 0));
    check_tree(&reader);

    if reader.kind() == Kind::Object {
        let merged = merge_json(data, data).expect("self-merge of an object");
        assert!(is_json(&merged));
        let merged = new_reader(&merged).expect("merge output parses");
        assert_eq!(merged.keys(), reader.keys());
    }
}

fuzz_target!(|data: &[u8]| reader(data));
