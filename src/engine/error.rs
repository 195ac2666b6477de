use crate::model::ReservationKey;
use crate::time::TimeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidTimeFormat(String),
    InvalidDateFormat(String),
    InvertedTimeRange { start: String, end: String },
    DurationExceeded { minutes: i64, max: i64 },
    /// Carries the key of the reservation already holding the slot.
    OverlappingReservation { existing: ReservationKey },
    DuplicateKey(ReservationKey),
    NoSuchReservation(ReservationKey),
    LimitExceeded(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidTimeFormat(text) => write!(f, "Error: Formato de hora inválido: {text}"),
            EngineError::InvalidDateFormat(text) => write!(f, "Error: Formato de fecha inválido: {text}"),
            EngineError::InvertedTimeRange { start, end } => write!(
                f,
                "Error: La hora de inicio {start} debe ser anterior a la hora de fin {end}"
            ),
            EngineError::DurationExceeded { minutes, max } => {
                write!(f, "Error: La reserva dura {minutes} minutos, el máximo es {max}")
            }
            EngineError::OverlappingReservation { existing: k } => write!(
                f,
                "Error: La reserva se solapa con {} el {} de {} a {}",
                k.resource_id, k.date, k.start, k.end
            ),
            EngineError::DuplicateKey(k) => write!(
                f,
                "Error: Ya existe una reserva para {} el {} de {} a {}",
                k.resource_id, k.date, k.start, k.end
            ),
            EngineError::NoSuchReservation(k) => write!(
                f,
                "Error: No existe ninguna reserva para {} el {} de {} a {}",
                k.resource_id, k.date, k.start, k.end
            ),
            EngineError::LimitExceeded(msg) => write!(f, "Error: Límite excedido: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<TimeError> for EngineError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::InvalidTime(text) => EngineError::InvalidTimeFormat(text),
            TimeError::InvalidDate(text) => EngineError::InvalidDateFormat(text),
        }
    }
}

impl EngineError {
    /// Short label used for metrics and structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InvalidTimeFormat(_) => "invalid_time_format",
            EngineError::InvalidDateFormat(_) => "invalid_date_format",
            EngineError::InvertedTimeRange { .. } => "inverted_time_range",
            EngineError::DurationExceeded { .. } => "duration_exceeded",
            EngineError::OverlappingReservation { .. } => "overlapping_reservation",
            EngineError::DuplicateKey(_) => "duplicate_key",
            EngineError::NoSuchReservation(_) => "no_such_reservation",
            EngineError::LimitExceeded(_) => "limit_exceeded",
        }
    }
}
