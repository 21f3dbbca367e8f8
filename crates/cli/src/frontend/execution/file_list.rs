use std::path::Path;

use crossbeam_channel::Receiver;
use flist::{
    Enumeration, FileListing, RemoteLister, RsyncListing, contains_wildcard, read_files_from,
    walk_local,
};
use tracing::debug;
use transport::{PathSpec, ToolConfig};

use crate::frontend::arguments::ParsedArgs;
use crate::frontend::error::RunError;

/// What the source enumeration produced.
#[derive(Debug)]
pub(crate) enum SourceListing {
    /// Files to transfer; may be empty.
    Files(FileListing),
    /// The wildcard in the source's final segment matched nothing.
    NoMatch { pattern: String },
}

/// Builds the file list for `source`.
///
/// `--files-from` wins over enumeration. Remote and wildcard sources go
/// through the `rsync -s` listing query; plain local sources are walked
/// directly. A message on `cancel` stops the listing query loop.
pub(crate) fn enumerate_source(
    args: &ParsedArgs,
    source: &PathSpec,
    tools: &ToolConfig,
    cancel: Option<&Receiver<()>>,
) -> Result<SourceListing, RunError> {
    if let Some(list) = &args.files_from {
        debug!(target: "prsync::flist", list = ?list, "reading files-from list");
        let listing = read_files_from(source, Path::new(list), args.from0)?;
        return Ok(SourceListing::Files(listing));
    }

    if source.is_remote() || contains_wildcard(source.final_segment()) {
        let mut lister =
            RemoteLister::new(RsyncListing::new(tools.clone())).lenient(args.lenient_listing);
        if let Some(cancel) = cancel {
            lister = lister.with_cancel(cancel.clone());
        }
        return Ok(match lister.enumerate(source)? {
            Enumeration::Files(listing) => SourceListing::Files(listing),
            Enumeration::NoWildcardMatch { pattern } => SourceListing::NoMatch { pattern },
        });
    }

    Ok(SourceListing::Files(walk_local(source.path())?))
}
