use serde_json::Value;

use crate::{ClientId, DataType, EntityPayload, PayloadError, RemovalPayload};

/// Entity-related events delivered by the transport, one at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum IncomingEvent {
    Update {
        from: ClientId,
        data_type: DataType,
        payload: EntityPayload,
    },
    Remove {
        from: ClientId,
        data_type: DataType,
        payload: RemovalPayload,
    },
    ClientDisconnected(ClientId),
    SyncRequested,
}

impl IncomingEvent {
    /// Reads a data-channel message carrying entity updates or a removal.
    ///
    /// The tag decides the shape: `r` is a removal, `um` batches several
    /// updates as `{ "d": [update, ..] }`, anything else is a single update.
    pub fn from_json(
        from: impl Into<ClientId>,
        tag: &str,
        data: &Value,
    ) -> Result<Vec<Self>, PayloadError> {
        let from = from.into();
        let data_type = DataType::from_tag(tag);
        match data_type {
            DataType::Remove => Ok(vec![IncomingEvent::Remove {
                payload: RemovalPayload::from_json(data)?,
                from,
                data_type,
            }]),
            DataType::UpdateMulti => {
                let Some(Value::Array(updates)) = data.get("d") else {
                    return Err(PayloadError::InvalidField {
                        field: "d",
                        reason: "expected an array of entity updates",
                    });
                };
                updates
                    .iter()
                    .map(|update| {
                        Ok(IncomingEvent::Update {
                            from: from.clone(),
                            data_type: data_type.clone(),
                            payload: EntityPayload::from_json(update)?,
                        })
                    })
                    .collect()
            }
            _ => Ok(vec![IncomingEvent::Update {
                payload: EntityPayload::from_json(data)?,
                from,
                data_type,
            }]),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IncomingEvent::Update { .. } => "Update",
            IncomingEvent::Remove { .. } => "Remove",
            IncomingEvent::ClientDisconnected(_) => "ClientDisconnected",
            IncomingEvent::SyncRequested => "SyncRequested",
        }
    }
}
