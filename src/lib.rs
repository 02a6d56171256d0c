/*!
bgpkit-ixf turns the live BGP session state of a [BIRD](https://bird.network.cz) route server into
an [IX-F member export](https://github.com/euro-ix/json-schemas) JSON document.

The pipeline has three stages, each consuming only the previous stage's output:

1. a [StatusSource] returns the text of `birdc show protocols all`,
2. [parse_status] splits it into BGP protocol blocks and extracts one [SessionRecord] per
   complete block,
3. [assemble] maps each record's BGP state onto `up`/`down` and builds a [Snapshot] in either
   the flat or the nested IX-F shape.

Only `Established` is reported as `up`; any other state, including unknown tokens, is `down`.

# Examples

```
use bgpkit_ixf::{assemble, parse_status, OutputShape};
use chrono::Utc;

let status = "BIRD 2.0.12 ready.
peer1      BGP        ---        up     2024-05-01    Established
  BGP state:          Established
    Neighbor address: 192.0.2.1
    Neighbor AS:      65001
peer2      BGP        ---        start  2024-05-01    Active
  BGP state:          Active
    Neighbor address: 192.0.2.2
    Neighbor AS:      65002
";

let records = parse_status(status);
let snapshot = assemble(&records, Utc::now(), &OutputShape::Flat);
let json = serde_json::to_value(&snapshot).unwrap();
assert_eq!(json["member_list"][0]["session_state"], "up");
assert_eq!(json["member_list"][1]["session_state"], "down");
```

Querying a local daemon and writing the document, as the `bgpkit-ixf` binary does:

```no_run
use bgpkit_ixf::{BirdcCollector, IxfExporter};

let exporter = IxfExporter::new(BirdcCollector::new());
exporter.export("/opt/bird_ixf/ixf.json").unwrap();
```
*/

pub mod assembler;
pub mod collector;
pub mod config;
pub mod error;
pub mod exporter;
pub mod io;
pub mod models;
pub mod parser;

pub use assembler::{assemble, MemberBuilder, OutputShape};
pub use collector::{BirdcCollector, FileSource, StatusSource};
pub use config::{ConfigOverrides, ExchangeMetadata, ExporterConfig};
pub use error::{CollectorError, ConfigError, ExportError, IxfError};
pub use exporter::IxfExporter;
pub use models::{SessionRecord, SessionState, Snapshot};
pub use parser::parse_status;
