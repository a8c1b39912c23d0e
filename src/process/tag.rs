use crate::error::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(i32)]
pub enum Tag {
    Task = 1,
    Utility = 2,
    End = 3,
}

impl TryFrom<i32> for Tag {
    type Error = Error;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        return match raw {
            1 => Ok(Tag::Task),
            2 => Ok(Tag::Utility),
            3 => Ok(Tag::End),
            other => Err(Error::ProtocolViolation(format!(
                "unknown message tag {}",
                other
            ))),
        };
    }
}
