/*!
Turns parsed session records into an IX-F [Snapshot].

The output shape is a strategy chosen by configuration: [FlatBuilder] writes one flat entry per
session, [NestedBuilder] writes IX-F member objects whose connections point at the exchange
described in `ixp_list`. Both consume the same [SessionRecord]s and share the same envelope.
*/
mod flat;
mod nested;

pub use flat::FlatBuilder;
pub use nested::NestedBuilder;

use crate::config::ExchangeMetadata;
use crate::models::{Ixp, Member, SessionRecord, Snapshot, IXF_SCHEMA_VERSION};
use chrono::{DateTime, Utc};

/// Builds one member entry per session record.
pub trait MemberBuilder {
    fn build_member(&self, record: &SessionRecord, timestamp: DateTime<Utc>) -> Member;

    /// Exchange list emitted alongside the members, if the shape has one.
    fn ixp_list(&self) -> Option<Vec<Ixp>> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputShape {
    Flat,
    Nested(ExchangeMetadata),
}

impl OutputShape {
    pub fn builder(&self) -> Box<dyn MemberBuilder + '_> {
        match self {
            OutputShape::Flat => Box::new(FlatBuilder),
            OutputShape::Nested(exchange) => Box::new(NestedBuilder::new(exchange)),
        }
    }
}

/// Assemble a snapshot. `timestamp` is used for the document and for every member.
///
/// Never fails; an empty `records` slice yields an empty `member_list`.
pub fn assemble(
    records: &[SessionRecord],
    timestamp: DateTime<Utc>,
    shape: &OutputShape,
) -> Snapshot {
    let builder = shape.builder();
    Snapshot {
        version: IXF_SCHEMA_VERSION.to_string(),
        timestamp,
        ixp_list: builder.ixp_list(),
        member_list: records
            .iter()
            .map(|record| builder.build_member(record, timestamp))
            .collect(),
    }
}
