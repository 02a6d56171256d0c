/*!
Splits `birdc show protocols all` output into per-protocol blocks.

BIRD prints one summary row per protocol at column zero, followed by indented detail lines:

```text
Name       Proto      Table      State  Since         Info
device1    Device     ---        up     2024-05-01
peer1      BGP        ---        up     2024-05-01    Established
  BGP state:          Established
    Neighbor address: 192.0.2.1
    Neighbor AS:      65001
```

A non-indented line always starts a new top-level entry. The entry becomes a [PeerBlock] only
if its protocol column names the BGP protocol; any other entry (including the greeting and the
table heading) is consumed together with its detail lines and never yielded.
*/
use std::mem;
use std::str::Lines;

/// Protocol column value of a BGP instance.
pub const BGP_MARKER: &str = "BGP";

/// Lines belonging to one BGP protocol instance, header included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerBlock<'a> {
    name: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> PeerBlock<'a> {
    fn new(header: &'a str, name: &'a str) -> PeerBlock<'a> {
        PeerBlock {
            name,
            lines: vec![header],
        }
    }

    /// BIRD protocol instance name, the first column of the header.
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn header(&self) -> &'a str {
        self.lines[0]
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }
}

enum SplitState<'a> {
    SeekingHeader,
    InBlock(PeerBlock<'a>),
}

/// Iterator over the BGP [PeerBlock]s of a status dump, in input order.
pub struct PeerBlocks<'a> {
    lines: Lines<'a>,
    state: SplitState<'a>,
}

impl<'a> PeerBlocks<'a> {
    pub fn new(text: &'a str) -> PeerBlocks<'a> {
        PeerBlocks {
            lines: text.lines(),
            state: SplitState::SeekingHeader,
        }
    }
}

/// Returns `(name, protocol)` if `line` starts a top-level entry.
fn entry_header(line: &str) -> Option<(&str, Option<&str>)> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    Some((name, tokens.next()))
}

impl<'a> Iterator for PeerBlocks<'a> {
    type Item = PeerBlock<'a>;

    fn next(&mut self) -> Option<PeerBlock<'a>> {
        loop {
            let Some(line) = self.lines.next() else {
                // flush a block that runs to the end of input
                return match mem::replace(&mut self.state, SplitState::SeekingHeader) {
                    SplitState::InBlock(block) => Some(block),
                    SplitState::SeekingHeader => None,
                };
            };

            let Some((name, protocol)) = entry_header(line) else {
                if let SplitState::InBlock(block) = &mut self.state {
                    block.lines.push(line);
                }
                continue;
            };

            let next_state = match protocol {
                Some(BGP_MARKER) => SplitState::InBlock(PeerBlock::new(line, name)),
                _ => SplitState::SeekingHeader,
            };
            if let SplitState::InBlock(finished) = mem::replace(&mut self.state, next_state) {
                return Some(finished);
            }
        }
    }
}
