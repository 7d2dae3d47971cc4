use proptest::prelude::*;

use dpack::size;
use dpack::{Decoder, Encoder, Error};

/// A map field value of every encodable kind.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Nil,
    Bool(bool),
    Uint(u64),
    Int(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Bin(Vec<u8>),
    List(Vec<bool>),
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        any::<u64>().prop_map(Value::Uint),
        // negative values only, non-negative ones decode as unsigned
        (i64::MIN..0).prop_map(Value::Int),
        any::<f32>().prop_filter("not NaN", |v| !v.is_nan()).prop_map(Value::Float),
        any::<f64>().prop_filter("not NaN", |v| !v.is_nan()).prop_map(Value::Double),
        "[a-zA-Z0-9 ]{1,300}".prop_map(Value::Str),
        prop::collection::vec(any::<u8>(), 1..=300).prop_map(Value::Bin),
        prop::collection::vec(any::<bool>(), 1..=20).prop_map(Value::List),
    ]
}

fn value_size(value: &Value) -> usize {
    match value {
        Value::Nil => size::NIL_SIZE,
        Value::Bool(_) => size::BOOL_SIZE,
        Value::Uint(v) => size::uint_size(*v),
        Value::Int(v) => size::int_size(*v),
        Value::Float(_) => size::F32_SIZE,
        Value::Double(_) => size::F64_SIZE,
        Value::Str(s) => size::str_size(s.len()),
        Value::Bin(b) => size::bin_size(b.len()),
        Value::List(l) => size::array_size(size::BOOL_SIZE, l.len() as u32),
    }
}

fn encode_fields(fields: &[(u16, Value)]) -> dpack::Result<Vec<u8>> {
    let mut enc = Encoder::new(Vec::new());
    enc.begin_map(fields.len() as u32)?;
    for (fid, value) in fields {
        let fid = *fid;
        match value {
            Value::Nil => enc.encode_field_nil(fid)?,
            Value::Bool(v) => enc.encode_field_bool(fid, *v)?,
            Value::Uint(v) => enc.encode_field_u64(fid, *v)?,
            Value::Int(v) => enc.encode_field_i64(fid, *v)?,
            Value::Float(v) => enc.encode_field_f32(fid, *v)?,
            Value::Double(v) => enc.encode_field_f64(fid, *v)?,
            Value::Str(v) => enc.encode_field_str(fid, v)?,
            Value::Bin(v) => enc.encode_field_bin(fid, v)?,
            Value::List(v) => {
                enc.begin_field_array(fid, v.len() as u32)?;
                for flag in v {
                    enc.encode_bool(*flag)?;
                }
                enc.end_array();
            }
        }
    }
    enc.end_map();
    enc.finish()
}

fn decode_value(dec: &mut Decoder<dpack::SliceReader<'_>>, like: &Value) -> dpack::Result<Value> {
    Ok(match like {
        Value::Nil => {
            dec.decode_nil()?;
            Value::Nil
        }
        Value::Bool(_) => Value::Bool(dec.decode_bool()?),
        Value::Uint(_) => Value::Uint(dec.decode_u64()?),
        Value::Int(_) => Value::Int(dec.decode_i64()?),
        Value::Float(_) => Value::Float(dec.decode_f32()?),
        Value::Double(_) => Value::Double(dec.decode_f64()?),
        Value::Str(_) => Value::Str(dec.decode_str_dup()?),
        Value::Bin(_) => Value::Bin(dec.decode_bin_dup()?),
        Value::List(_) => {
            let mut list = Vec::new();
            dec.decode_array(|dec, _| {
                list.push(dec.decode_bool()?);
                Ok::<_, Error>(())
            })?;
            Value::List(list)
        }
    })
}

proptest! {
    /// Every map decodes back to its fields, its size known up front
    #[test]
    fn prop_map_round_trip(
        fields in prop::collection::vec((0u16..=1024, value_strategy()), 1..=40)
    ) {
        let out = encode_fields(&fields).unwrap();
        let data_size = fields.iter()
            .map(|(fid, value)| size::field_size(*fid, value_size(value)))
            .sum();
        prop_assert_eq!(out.len(), size::map_size(fields.len() as u32, data_size));

        let mut decoded = Vec::new();
        let mut dec = Decoder::from_slice(&out);
        let nr = dec.decode_map_equ(fields.len() as u32, |dec, fid| {
            let value = decode_value(dec, &fields[decoded.len()].1)?;
            decoded.push((fid, value));
            Ok::<_, Error>(())
        }).unwrap();
        prop_assert_eq!(nr as usize, fields.len());
        prop_assert_eq!(decoded, fields);
        prop_assert_eq!(dec.data_left(), 0);
    }

    /// Skipping a map of any content consumes it exactly
    #[test]
    fn prop_skip_consumes_exactly(
        fields in prop::collection::vec((0u16..=1024, value_strategy()), 1..=20),
        sentinel in any::<u16>()
    ) {
        let mut out = encode_fields(&fields).unwrap();
        let mut enc = Encoder::new(&mut out);
        enc.encode_u16(sentinel).unwrap();
        enc.finish().unwrap();

        let mut dec = Decoder::from_slice(&out);
        dec.skip_item().unwrap();
        prop_assert_eq!(dec.decode_u16(), Ok(sentinel));
        prop_assert_eq!(dec.data_left(), 0);
    }

    /// A rejected map leaves a discarding decoder just past it
    #[test]
    fn prop_mismatch_discards_exactly(
        fields in prop::collection::vec((0u16..=1024, value_strategy()), 2..=20)
    ) {
        let mut out = encode_fields(&fields).unwrap();
        out.push(0xc3);
        let nr = fields.len() as u32;

        let mut dec = Decoder::from_slice_discard(&out);
        let res = dec.decode_map_max(nr - 1, |dec, _| dec.skip_item());
        prop_assert_eq!(res, Err(Error::SizeMismatch));
        prop_assert_eq!(dec.decode_bool(), Ok(true));

        let mut dec = Decoder::from_slice_discard(&out);
        let res = dec.decode_map(|dec, _| {
            dec.skip_item()?;
            Err(Error::InvalidRange)
        });
        prop_assert_eq!(res, Err(Error::InvalidRange));
        prop_assert_eq!(dec.decode_bool(), Ok(true));
    }

    /// Integers encode to their computed size and decode to any wide enough type
    #[test]
    fn prop_int_sizes(v in any::<i64>()) {
        let mut enc = Encoder::new(Vec::new());
        enc.encode_i64(v).unwrap();
        let out = enc.finish().unwrap();
        prop_assert_eq!(out.len(), size::int_size(v));
        let mut dec = Decoder::from_slice(&out);
        prop_assert_eq!(dec.decode_i64(), Ok(v));
        match u64::try_from(v) {
            Ok(u) => {
                prop_assert_eq!(size::uint_size(u), size::int_size(v));
                prop_assert_eq!(Decoder::from_slice(&out).decode_u64(), Ok(u));
            }
            Err(_) => {
                prop_assert_eq!(Decoder::from_slice(&out).decode_u64(), Err(Error::WrongType));
            }
        }
        match i16::try_from(v) {
            Ok(s) => {
                prop_assert_eq!(Decoder::from_slice(&out).decode_i16(), Ok(s));
            }
            Err(_) => {
                prop_assert_eq!(Decoder::from_slice(&out).decode_i16(), Err(Error::InvalidRange));
            }
        }
    }

    /// Non-negative signed integers are written exactly as unsigned ones
    #[test]
    fn prop_non_negative_int_as_unsigned(v in 0..=i64::MAX) {
        let mut enc = Encoder::new(Vec::new());
        enc.encode_i64(v).unwrap();
        if let Ok(s) = i32::try_from(v) {
            enc.encode_i32(s).unwrap();
        }
        let signed = enc.finish().unwrap();
        let mut enc = Encoder::new(Vec::new());
        enc.encode_u64(v as u64).unwrap();
        if let Ok(s) = i32::try_from(v) {
            enc.encode_u32(s as u32).unwrap();
        }
        let unsigned = enc.finish().unwrap();
        prop_assert_eq!(signed, unsigned);
    }

    /// Short buffers reject a string without writing any of it
    #[test]
    fn prop_str_no_partial_write(s in "[a-z]{1,100}", room in 0usize..110) {
        let mut buf = vec![0u8; room];
        let mut enc = Encoder::from_slice(&mut buf);
        let res = enc.encode_str(&s);
        let needed = size::str_size(s.len());
        if needed <= room {
            prop_assert_eq!(res, Ok(()));
            prop_assert_eq!(enc.space_used(), needed);
        }
        else {
            prop_assert_eq!(res, Err(Error::NotEnoughSpace));
            prop_assert_eq!(enc.space_used(), 0);
        }
    }
}
