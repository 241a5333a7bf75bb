//! ID3 decision tree induction for categorical datasets.
//!
//! ```
//! use id3tree::domain::{predict, Sample, TreeBuilder};
//! use id3tree::util::testing::play_tennis;
//!
//! let data = play_tennis();
//! let tree = TreeBuilder::new("Play").build(&data.rows, &data.features()).unwrap();
//! assert_eq!(tree.feature(), Some("Outlook"));
//!
//! let mut sample = Sample::new();
//! sample.insert("Outlook".into(), "Overcast".into());
//! assert_eq!(predict(&tree, &sample), "Yes");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
