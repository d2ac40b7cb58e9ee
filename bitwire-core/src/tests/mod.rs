extern crate std;


use crate::WireEnum;

// Three real colors plus the sentinel, two bits on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Green,
    Blue,
    Error,
}

impl WireEnum for Color {
    const COUNT: u64 = 3;
    const ERROR: Self = Color::Error;

    fn to_raw(self) -> u64 {
        self as u64
    }

    fn from_raw(raw: u64) -> Self {
        match raw {
            0 => Color::Red,
            1 => Color::Green,
            2 => Color::Blue,
            _ => Color::Error,
        }
    }
}
