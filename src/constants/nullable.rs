//! Defining if a column accepts null so I'm not using a bool everywhere

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nullable {
    Null,
    NotNull,
}

impl From<bool> for Nullable {
    fn from(b: bool) -> Self {
        if b {
            Nullable::Null
        } else {
            Nullable::NotNull
        }
    }
}
