//! # indentree
//!
//! Builds a tree of nodes from text whose structure is given by indentation alone.
//!
//! A line that is indented deeper than the line before it becomes that line's child, a line at
//! the same depth becomes its sibling, and a line that backs out closes every deeper level. On top
//! of that, a line can ask for the lines below it to be captured verbatim as a raw body, either
//! explicitly by ending in `{` (closed by a `}` line) or implicitly through the line parser.
//!
//! Layout
//!
//! src/indentree
//!   ├── tree        Node arena and snapshots
//!   ├── lines       Per-line preprocessing (comments, markers, indentation)
//!   ├── parsing     The pluggable line parser capability
//!   ├── building    The indentation state machine
//!   ├── formats     Serializers (tag, treeviz, json, yaml)
//!   ├── loader      Reading sources from disk or strings
//!   └── testing     Fluent tree assertions
//!
//! For most callers [`indentree::build`] is the entry point.

pub mod indentree;
