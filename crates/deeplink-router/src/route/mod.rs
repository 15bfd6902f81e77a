/// Route pattern model: typed segments, the parser, the matcher, and the
/// inverse URL generator.

pub mod matcher;
pub mod parser;
pub mod segment;
pub mod url;

pub use matcher::{match_all, MatchOptions};
pub use parser::{Pattern, QueryConstraint};
pub use segment::{classify_segment, RouteSegment};
pub use url::{match_to_url, UrlOptions};
