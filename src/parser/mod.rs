/*!
Parser for BIRD `show protocols all` output.

Parsing never fails: blocks of other protocols are skipped and BGP blocks missing a neighbor AS
or neighbor address are dropped, so dirty or partial daemon output still yields every session
that can be identified.

```
use bgpkit_ixf::parser::parse_status;

let status = "peer1 BGP --- up 2024-05-01 Established
  BGP state:          Established
    Neighbor address: 192.0.2.1
    Neighbor AS:      65001
";
let records = parse_status(status);
assert_eq!(records.len(), 1);
assert_eq!(records[0].neighbor_asn, 65001);
```
*/
pub mod block;
pub mod fields;

pub use block::{PeerBlock, PeerBlocks, BGP_MARKER};
pub use fields::extract_record;

use crate::models::SessionRecord;
use log::debug;

/// Parse a full status dump into session records, in the order the blocks appear.
pub fn parse_status(text: &str) -> Vec<SessionRecord> {
    let mut blocks = 0;
    let records = PeerBlocks::new(text)
        .inspect(|_| blocks += 1)
        .filter_map(|block| extract_record(&block))
        .collect::<Vec<_>>();
    debug!(
        "parsed {} sessions from {} BGP protocol blocks",
        records.len(),
        blocks
    );
    records
}
