use hyabi::{AbiType, Address, FixedBytesType, IntType, TupleValue, Value};
use num_bigint::{BigInt, BigUint};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const ROUNDS: usize = 256;

fn random_type(rng: &mut impl Rng, depth: usize) -> AbiType {
    if depth == 0 || rng.random_bool(0.5) {
        return match rng.random_range(0..=6) {
            0 => AbiType::uint(8 * rng.random_range(1..=32)),
            1 => AbiType::int(8 * rng.random_range(1..=32)),
            2 => AbiType::Bool,
            3 => AbiType::Address,
            4 => AbiType::fixed_bytes(rng.random_range(1..=32)),
            5 => AbiType::Bytes,
            6 => AbiType::String,
            _ => unreachable!(),
        };
    }

    match rng.random_range(0..=2) {
        0 => random_type(rng, depth - 1).fixed_array_of(rng.random_range(1..=3)),
        1 => random_type(rng, depth - 1).array_of(),
        2 => {
            let arity = rng.random_range(1..=4);
            AbiType::Tuple(hyabi::TupleType::unnamed(
                (0..arity).map(|_| random_type(rng, depth - 1)),
            ))
        }
        _ => unreachable!(),
    }
}

fn random_bytes(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes[..]);
    bytes
}

fn random_uint(rng: &mut impl Rng, ty: IntType) -> BigUint {
    let bytes = random_bytes(rng, ty.byte_size());
    BigUint::from_bytes_be(&bytes)
}

fn random_int(rng: &mut impl Rng, ty: IntType) -> BigInt {
    let (min, max) = ty.signed_range();
    match rng.random_range(0..=3) {
        0 => min,
        1 => max,
        _ => {
            let magnitude = random_uint(rng, ty) >> 1u32;
            if rng.random_bool(0.5) {
                -BigInt::from(magnitude)
            } else {
                BigInt::from(magnitude)
            }
        }
    }
}

fn random_value(rng: &mut impl Rng, ty: &AbiType) -> Value {
    match ty {
        AbiType::Uint(int) => Value::Uint {
            ty: *int,
            value: random_uint(rng, *int),
        },
        AbiType::Int(int) => Value::Int {
            ty: *int,
            value: random_int(rng, *int),
        },
        AbiType::Bool => Value::Bool(rng.random_bool(0.5)),
        AbiType::Address => {
            let mut raw = [0u8; 20];
            rng.fill(&mut raw[..]);
            Value::Address(Address::new(raw))
        }
        AbiType::FixedBytes(fixed) => {
            let len = rng.random_range(0..=fixed.size());
            Value::FixedBytes {
                ty: *fixed,
                bytes: random_bytes(rng, len),
            }
        }
        AbiType::Bytes => {
            let len = rng.random_range(0..80);
            Value::Bytes(random_bytes(rng, len))
        }
        AbiType::String => {
            let len = rng.random_range(0..48);
            Value::String(
                (0..len)
                    .map(|_| char::from(rng.random_range(b'a'..=b'z')))
                    .collect(),
            )
        }
        AbiType::FixedArray(array) => {
            let items = (0..array.num_elements)
                .map(|_| random_value(rng, &array.ty))
                .collect();
            Value::fixed_array(array.ty.as_ref().clone(), items).unwrap()
        }
        AbiType::Array(elem) => {
            let len = rng.random_range(0..=3);
            let items = (0..len).map(|_| random_value(rng, elem)).collect();
            Value::array(elem.as_ref().clone(), items).unwrap()
        }
        AbiType::Tuple(tuple) => Value::Tuple(TupleValue::unnamed(
            tuple.iter().map(|c| random_value(rng, &c.ty)).collect::<Vec<_>>(),
        )),
    }
}

fn read_offset(bytes: &[u8], word: usize) -> usize {
    let chunk = &bytes[word * 32..(word + 1) * 32];
    assert!(chunk[..24].iter().all(|&b| b == 0), "offset does not fit");
    let mut be = [0u8; 8];
    be.copy_from_slice(&chunk[24..]);
    u64::from_be_bytes(be) as usize
}

#[test]
fn encodings_are_word_aligned() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    for _ in 0..ROUNDS {
        let ty = random_type(&mut rng, 3);
        let value = random_value(&mut rng, &ty);
        assert_eq!(value.abi_type(), ty);

        let bytes = value.encode().unwrap();
        assert_eq!(bytes.len() % 32, 0, "`{}` is not word aligned", ty);
        assert!(!bytes.is_empty());
    }
}

#[test]
fn static_types_have_fixed_size() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x1337);
    let mut checked = 0;
    for _ in 0..ROUNDS {
        let ty = random_type(&mut rng, 3);
        let Some(words) = ty.static_words() else {
            assert!(ty.is_dynamic());
            continue;
        };
        assert!(!ty.is_dynamic());

        let bytes = random_value(&mut rng, &ty).encode().unwrap();
        assert_eq!(bytes.len(), words * 32, "unexpected size for `{}`", ty);
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn head_offsets_locate_dynamic_elements() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xabcd);
    for _ in 0..ROUNDS {
        let arity = rng.random_range(1..=5);
        let types: Vec<AbiType> = (0..arity).map(|_| random_type(&mut rng, 2)).collect();
        let values: Vec<Value> = types.iter().map(|ty| random_value(&mut rng, ty)).collect();
        let bytes = TupleValue::unnamed(values.clone()).encode().unwrap();

        let mut head_word = 0;
        for value in &values {
            let element = value.encode().unwrap();
            if value.is_dynamic() {
                let offset = read_offset(&bytes, head_word);
                assert_eq!(offset % 32, 0);
                assert_eq!(&bytes[offset..offset + element.len()], &element[..]);
                head_word += 1;
            } else {
                let start = head_word * 32;
                assert_eq!(&bytes[start..start + element.len()], &element[..]);
                head_word += element.len() / 32;
            }
        }
    }
}

#[test]
fn out_of_range_integers_never_encode() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    for _ in 0..ROUNDS {
        let ty = IntType::new(8 * rng.random_range(1..=32)).unwrap();

        let too_big = ty.max_unsigned() + 1u32 + random_uint(&mut rng, ty);
        let value = Value::Uint { ty, value: too_big };
        assert!(value.encode().unwrap_err().is_overflow());

        let (min, _) = ty.signed_range();
        let value = Value::Int {
            ty,
            value: min - 1 - BigInt::from(random_uint(&mut rng, ty)),
        };
        assert!(value.encode().unwrap_err().is_overflow());
    }

    // Fixed bytes longer than declared are rejected, never truncated.
    let ty = FixedBytesType::new(4).unwrap();
    let value = Value::FixedBytes {
        ty,
        bytes: vec![0; 5],
    };
    assert!(value.encode().unwrap_err().is_too_long());
}
