use num_derive::FromPrimitive;

/// Navigational status as transmitted in the four bit status field of a position report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, FromPrimitive, strum::Display)]
#[repr(u8)]
pub enum NavigationStatus {
    #[default]
    UnderWayUsingEngine = 0,
    AtAnchor = 1,
    NotUnderCommand = 2,
    RestrictedManoeuverability = 3,
    ConstrainedByDraught = 4,
    Moored = 5,
    Aground = 6,
    EngagedInFishing = 7,
    UnderWaySailing = 8,
    Reserved9 = 9,
    Reserved10 = 10,
    Reserved11 = 11,
    Reserved12 = 12,
    Reserved13 = 13,
    AisSartIsActive = 14,
    NotDefined = 15,
}

/// The class A position report variants, they share the same 168 bit layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MessageKind {
    /// Message type 1, scheduled position report.
    #[default]
    PositionReport,
    /// Message type 2, assigned scheduled position report.
    AssignedPositionReport,
    /// Message type 3, position report sent in response to interrogation.
    InterrogatedPositionReport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionReport {
    pub kind: MessageKind,
    pub mmsi: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// Speed over ground in knots.
    pub speed: f64,
    /// Course over ground in degrees.
    pub course: f64,
    pub status: NavigationStatus,
}

impl MessageKind {
    pub fn message_type(&self) -> u8 {
        match self {
            MessageKind::PositionReport => 1,
            MessageKind::AssignedPositionReport => 2,
            MessageKind::InterrogatedPositionReport => 3,
        }
    }

    pub fn from_message_type(message_type: u8) -> Option<MessageKind> {
        match message_type {
            1 => Some(MessageKind::PositionReport),
            2 => Some(MessageKind::AssignedPositionReport),
            3 => Some(MessageKind::InterrogatedPositionReport),
            _ => None,
        }
    }
}
