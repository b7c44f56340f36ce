use crate::domain::entry::{Asset, Entry, EntryCollection, Link, LinkType};
use crate::utils::error::{ContentError, Result};
use std::collections::HashMap;

/// Outcome of following a link inside one response.
#[derive(Debug)]
pub enum Reference<'a> {
    Entry(&'a Entry),
    Asset(&'a Asset),
    Unresolved(Link),
}

/// Resolves links against the items and `includes` of a single collection.
pub struct LinkResolver<'a> {
    entries: HashMap<&'a str, &'a Entry>,
    assets: HashMap<&'a str, &'a Asset>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(collection: &'a EntryCollection) -> Self {
        let entries = collection
            .items
            .iter()
            .chain(collection.includes.entries.iter())
            .map(|entry| (entry.id(), entry))
            .collect();

        let assets = collection
            .includes
            .assets
            .iter()
            .map(|asset| (asset.sys.id.as_str(), asset))
            .collect();

        Self { entries, assets }
    }

    pub fn resolve(&self, link: &Link) -> Reference<'a> {
        let found = match link.link_type() {
            Some(LinkType::Entry) => self.entries.get(link.id()).map(|e| Reference::Entry(*e)),
            Some(LinkType::Asset) => self.assets.get(link.id()).map(|a| Reference::Asset(*a)),
            None => None,
        };
        found.unwrap_or_else(|| Reference::Unresolved(link.clone()))
    }

    /// A reference field that must point at an included entry.
    pub fn entry(&self, owner: &Entry, field: &str) -> Result<&'a Entry> {
        let link = owner.link(field).ok_or_else(|| unresolved(owner, field, ""))?;
        self.link_to_entry(owner, field, &link)
    }

    /// Every entry of a multi-reference field, in authoring order.
    pub fn entries(&self, owner: &Entry, field: &str) -> Result<Vec<&'a Entry>> {
        owner
            .links(field)
            .iter()
            .map(|link| self.link_to_entry(owner, field, link))
            .collect()
    }

    /// Public URL of a required asset field, as stored by the CMS.
    pub fn asset_url(&self, owner: &Entry, field: &str) -> Result<String> {
        let link = owner.link(field).ok_or_else(|| unresolved(owner, field, ""))?;
        self.link_to_asset_url(owner, field, &link)
    }

    pub fn optional_asset_url(&self, owner: &Entry, field: &str) -> Result<Option<String>> {
        owner
            .link(field)
            .map(|link| self.link_to_asset_url(owner, field, &link))
            .transpose()
    }

    fn link_to_entry(&self, owner: &Entry, field: &str, link: &Link) -> Result<&'a Entry> {
        match self.resolve(link) {
            Reference::Entry(entry) => Ok(entry),
            Reference::Asset(asset) => Err(unresolved(owner, field, &asset.sys.id)),
            Reference::Unresolved(link) => Err(unresolved(owner, field, link.id())),
        }
    }

    fn link_to_asset_url(&self, owner: &Entry, field: &str, link: &Link) -> Result<String> {
        match self.resolve(link) {
            Reference::Asset(asset) => asset.url().map(str::to_string).ok_or_else(|| {
                ContentError::MissingField {
                    entry_id: asset.sys.id.clone(),
                    field: "file.url".to_string(),
                }
            }),
            Reference::Entry(entry) => Err(unresolved(owner, field, entry.id())),
            Reference::Unresolved(link) => Err(unresolved(owner, field, link.id())),
        }
    }
}

fn unresolved(owner: &Entry, field: &str, target_id: &str) -> ContentError {
    ContentError::UnresolvedReference {
        entry_id: owner.id().to_string(),
        field: field.to_string(),
        target_id: target_id.to_string(),
    }
}
