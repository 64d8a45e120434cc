use alloc::string::String;

use quickcheck::{Arbitrary, Gen};

use crate::{Array, Map, Value};

/// Everything the lexer accepts inside a string, structural bytes included.
const ALPHABET: &[u8] = b"abcnultrfeXYZ0189 _-.:,{}[]";

/// A value without floats, which do not survive a text round trip exactly.
#[derive(Debug, Clone)]
pub(crate) struct FloatFree(pub Value);

fn gen_string(g: &mut Gen) -> String {
    let len = usize::arbitrary(g) % 8;
    (0..len)
        .map(|_| char::from(*g.choose(ALPHABET).unwrap_or(&b'a')))
        .collect()
}

fn gen_val(g: &mut Gen, depth: usize, floats: bool) -> Value {
    let leaves = if floats { 5 } else { 4 };
    let choices = if depth == 0 { leaves } else { leaves + 2 };
    match usize::arbitrary(g) % choices {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        // No negative numbers on the wire.
        2 => Value::Integer(i32::arbitrary(g) & i32::MAX),
        3 => Value::String(gen_string(g)),
        n if floats && n == 4 => Value::Float(f32::from(u16::arbitrary(g)) / 64.0),
        n if n == leaves => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| gen_val(g, depth - 1, floats)).collect::<Array>())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            let mut map = Map::new();
            for _ in 0..len {
                map.insert(gen_string(g), gen_val(g, depth - 1, floats));
            }
            Value::Object(map)
        }
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        gen_val(g, depth, true)
    }
}

impl Arbitrary for FloatFree {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        FloatFree(gen_val(g, depth, false))
    }
}
