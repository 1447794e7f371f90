//! Catalog construction and lookups.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use crate::config::Config;

/// Permission group applied to players without an explicit assignment.
pub const DEFAULT_GROUP: &str = "default";

/// Reasons a configuration cannot become a catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A server entry has an empty name.
    #[error("server entry with empty name")]
    EmptyServerName,

    /// Two server entries share a name.
    #[error("duplicate server name: {0}")]
    DuplicateServer(String),

    /// A group membership has an empty name.
    #[error("empty group name on server {0}")]
    EmptyGroupName(String),

    /// A group was declared without any member.
    #[error("group has no members: {0}")]
    EmptyGroup(String),

    /// The same name is used for a server and a group.
    #[error("name is used both as a server and as a group: {0}")]
    NameCollision(String),
}

/// One backend server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerDescriptor {
    /// Unique server name.
    pub name: String,
    /// Backend network address.
    pub address: String,
    /// Groups this server belongs to, sorted.
    pub groups: Vec<String>,
    /// Media pool, empty for the shared default pool.
    pub media_pool: String,
}

/// Immutable view of servers, groups and permissions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    servers: BTreeMap<String, ServerDescriptor>,
    groups: BTreeMap<String, Vec<String>>,
    permission_groups: BTreeMap<String, Vec<String>>,
    user_groups: HashMap<String, String>,
}

impl Catalog {
    /// Create a catalog with no servers, groups or permissions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build and validate a catalog from a loaded configuration.
    ///
    /// Group membership is the union of the groups listed on each server
    /// and the explicit `server_groups` table. Explicit members are not
    /// required to be configured servers; hopping to such a member fails
    /// later with an unknown-server error.
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let mut servers = BTreeMap::new();
        let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for entry in &config.servers {
            if entry.name.is_empty() {
                return Err(CatalogError::EmptyServerName);
            }
            if servers.contains_key(&entry.name) {
                return Err(CatalogError::DuplicateServer(entry.name.clone()));
            }

            let mut server_groups = BTreeSet::new();
            for group in &entry.groups {
                if group.is_empty() {
                    return Err(CatalogError::EmptyGroupName(entry.name.clone()));
                }
                server_groups.insert(group.clone());
                groups
                    .entry(group.clone())
                    .or_default()
                    .insert(entry.name.clone());
            }

            servers.insert(
                entry.name.clone(),
                ServerDescriptor {
                    name: entry.name.clone(),
                    address: entry.address.clone(),
                    groups: server_groups.into_iter().collect(),
                    media_pool: entry.media_pool.clone(),
                },
            );
        }

        for (group, members) in &config.server_groups {
            if members.is_empty() {
                return Err(CatalogError::EmptyGroup(group.clone()));
            }
            let set = groups.entry(group.clone()).or_default();
            for member in members {
                set.insert(member.clone());
                if let Some(server) = servers.get_mut(member) {
                    if !server.groups.contains(group) {
                        server.groups.push(group.clone());
                        server.groups.sort();
                    }
                }
            }
        }

        if let Some(name) = groups.keys().find(|g| servers.contains_key(*g)) {
            return Err(CatalogError::NameCollision(name.clone()));
        }

        Ok(Self {
            servers,
            groups: groups
                .into_iter()
                .map(|(name, members)| (name, members.into_iter().collect()))
                .collect(),
            permission_groups: config.permission_groups.clone(),
            user_groups: config.user_groups.clone(),
        })
    }

    /// Look up a server by name.
    pub fn server(&self, name: &str) -> Option<&ServerDescriptor> {
        self.servers.get(name)
    }

    /// Check if a server is configured.
    pub fn has_server(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// All configured server names, sorted.
    pub fn server_names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    /// Members of a group, sorted. `None` if the group does not exist.
    pub fn group_members(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// All group names, sorted.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Permission group a player belongs to.
    pub fn user_group<'a>(&'a self, player: &str) -> &'a str {
        self.user_groups
            .get(player)
            .map(String::as_str)
            .unwrap_or(DEFAULT_GROUP)
    }

    /// Tokens granted by a permission group.
    pub fn permission_group(&self, group: &str) -> Option<&[String]> {
        self.permission_groups.get(group).map(Vec::as_slice)
    }
}
