use std::sync::Arc;

use chrono::NaiveDate;
use derive_more::Deref;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{
    Error, Result,
    ranker::{Proximity, days_until_next, rank_by_proximity},
    repository::{
        config::{Cfg, CoreConfig},
        storage::{FileStore, KeyValueStore, StorageError},
    },
    sanitize::escape_html,
    validation::{ValidFields, validate},
};

mod member;

pub mod config;
pub mod storage;

pub use member::{Member, MemberId};

#[derive(Debug, Clone, Deref)]
struct Store {
    #[deref]
    inner: Arc<dyn KeyValueStore>,
}

/// Why [`Repository::list_all`] came back empty even though something may be stored.
#[derive(Debug, thiserror::Error)]
pub enum LoadWarning {
    #[error("Stored member list is malformed: {0}")]
    Malformed(String),
    #[error("Stored member list could not be read: {0}")]
    Unreadable(#[source] StorageError),
}

/// Result of reading the whole member list. `members` is empty whenever `warning` is set.
#[derive(Debug, Default)]
pub struct Loaded {
    pub members: Vec<Member>,
    pub warning: Option<LoadWarning>,
}

/// A member in display order, with how far away their birthday is.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub member: Member,
    pub days_until: u32,
    pub proximity: Proximity,
}

/// A member that was just written, and the malformed contents it replaced, if any.
#[derive(Debug)]
pub struct Saved {
    pub member: Member,
    pub replaced: Option<LoadWarning>,
}

#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<Ranked>,
    pub warning: Option<LoadWarning>,
}

/// Whether a form submission creates a new member or edits an existing one.
///
/// Held by the caller and passed into [`Repository::submit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditContext {
    #[default]
    None,
    Editing(MemberId),
}

/// Central access point for the persisted member list.
///
/// Every operation reads the full list from storage when it is called, and every
/// mutation writes the full list back with a single storage write. Nothing is cached
/// between calls.
#[derive(Clone, Debug)]
pub struct Repository {
    store: Store,
    cfg: Cfg,
}

impl Repository {
    /// Open a file backed repository in the configured data directory.
    pub fn open(cfg: CoreConfig) -> Result<Self> {
        let dir = cfg.data_dir().map_err(StorageError::from)?;

        Ok(Self::with_store(FileStore::new(dir), cfg))
    }

    pub fn with_store(store: impl KeyValueStore + 'static, cfg: CoreConfig) -> Self {
        Self {
            store: Store {
                inner: Arc::new(store),
            },
            cfg: Arc::new(RwLock::new(cfg)),
        }
    }

    pub fn cfg(&self) -> &Cfg {
        &self.cfg
    }

    /// All members in storage order. Missing storage reads as an empty list; unreadable or
    /// malformed storage also reads as empty, with a warning attached.
    pub fn list_all(&self) -> Loaded {
        match self.read() {
            Ok(members) => Loaded {
                members,
                warning: None,
            },
            Err(warning) => {
                warn!("{warning}");
                Loaded {
                    members: Vec::new(),
                    warning: Some(warning),
                }
            }
        }
    }

    /// All members ranked by how soon their birthday comes, as seen from `today`.
    pub fn listing(&self, today: NaiveDate) -> Listing {
        let Loaded { members, warning } = self.list_all();
        let soon = self.cfg.read().soon_threshold_days;

        let entries = rank_by_proximity(members, today)
            .into_iter()
            .map(|member| {
                let days_until = days_until_next(member.day, member.month, today);
                Ranked {
                    member,
                    days_until,
                    proximity: Proximity::classify(days_until, soon),
                }
            })
            .collect();

        Listing { entries, warning }
    }

    /// Members whose birthday is `today`, in storage order.
    pub fn todays_birthdays(&self, today: NaiveDate) -> Vec<Member> {
        self.list_all()
            .members
            .into_iter()
            .filter(|m| days_until_next(m.day, m.month, today) == 0)
            .collect()
    }

    /// Create or update a member from raw form values, depending on `ctx`.
    pub fn submit(
        &self,
        ctx: &EditContext,
        name: &str,
        day: &str,
        month: &str,
    ) -> Result<Saved> {
        match ctx {
            EditContext::None => self.create(name, day, month),
            EditContext::Editing(id) => Ok(Saved {
                member: self.update(id, name, day, month)?,
                replaced: None,
            }),
        }
    }

    /// Add a new member with a fresh id.
    ///
    /// Malformed storage is replaced by a list holding only the new member, and the
    /// dropped contents are reported back in [`Saved::replaced`]. Storage that can't be
    /// read fails the call without writing.
    pub fn create(&self, name: &str, day: &str, month: &str) -> Result<Saved> {
        let fields = validate(name, day, month)?;

        let (mut members, replaced) = match self.read() {
            Ok(members) => (members, None),
            Err(LoadWarning::Malformed(reason)) => {
                warn!("Replacing malformed member list: {reason}");
                (Vec::new(), Some(LoadWarning::Malformed(reason)))
            }
            Err(warning) => return Err(warning.into()),
        };

        ensure_unique(&members, &fields, None)?;

        let id = loop {
            let id = MemberId::generate();
            if !members.iter().any(|m| m.id == id) {
                break id;
            }
        };

        let member = Member::new(id, &fields);
        members.push(member.clone());

        self.write(&members)?;

        debug!("Added member: {}", member.name);

        Ok(Saved { member, replaced })
    }

    /// Replace the name and birthday of an existing member, keeping its id and any other
    /// stored fields. Malformed storage fails the call and is left as it is.
    pub fn update(&self, id: &MemberId, name: &str, day: &str, month: &str) -> Result<Member> {
        let fields = validate(name, day, month)?;

        let mut members = self.read()?;
        let index = members
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        ensure_unique(&members, &fields, Some(id))?;

        let member = members
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        member.apply(&fields);
        let updated = member.clone();

        self.write(&members)?;

        debug!("Updated member {id}: {}", updated.name);

        Ok(updated)
    }

    /// Remove a member once `confirm` agrees. Returns `None` if the caller declined, in which
    /// case nothing is written. Malformed storage fails the call and is left as it is.
    pub fn delete<F>(&self, id: &MemberId, confirm: F) -> Result<Option<Member>>
    where
        F: FnOnce(&Member) -> bool,
    {
        let mut members = self.read()?;
        let index = members
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        if !members.get(index).is_some_and(confirm) {
            return Ok(None);
        }

        let removed = members.remove(index);

        self.write(&members)?;

        debug!("Removed member {id}: {}", removed.name);

        Ok(Some(removed))
    }

    /// [`Repository::delete`] with the confirmation already decided by the caller.
    pub fn request_delete(&self, id: &MemberId, confirmed: bool) -> Result<Option<Member>> {
        self.delete(id, |_| confirmed)
    }

    /// Remove every member. Returns `false` without touching storage unless `confirmed`.
    pub fn clear_all(&self, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }

        self.store.remove(&self.storage_key())?;

        debug!("Cleared all members");

        Ok(true)
    }

    /// The full member list as pretty-printed JSON, in storage order. Fails on malformed
    /// storage rather than exporting an empty list.
    pub fn export(&self) -> Result<String> {
        let members = self.read()?;

        Ok(serde_json::to_string_pretty(&members)?)
    }

    fn storage_key(&self) -> String {
        self.cfg.read().storage_key.clone()
    }

    fn read(&self) -> std::result::Result<Vec<Member>, LoadWarning> {
        let raw = self
            .store
            .get(&self.storage_key())
            .map_err(LoadWarning::Unreadable)?;

        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        let members: Vec<Member> =
            serde_json::from_str(&raw).map_err(|err| LoadWarning::Malformed(err.to_string()))?;

        if let Some(bad) = members.iter().find(|m| !m.is_well_formed()) {
            return Err(LoadWarning::Malformed(format!(
                "member {} has an invalid birthday {}/{}",
                bad.id, bad.day, bad.month
            )));
        }

        Ok(members)
    }

    fn write(&self, members: &[Member]) -> Result<()> {
        let json = serde_json::to_string(members)?;

        self.store
            .set(&self.storage_key(), &json)
            .inspect_err(|err| warn!("Failed to save members: {err}"))?;

        Ok(())
    }

    #[cfg(test)]
    /// Return a mock version of a [`Repository`] with in-memory storage and a default
    /// configuration.
    pub(crate) fn mock() -> Self {
        Self::with_store(storage::MemoryStore::new(), CoreConfig::mock())
    }
}

/// Fail if another member (ignoring `exclude`) has the same name and birthday.
fn ensure_unique(
    members: &[Member],
    fields: &ValidFields,
    exclude: Option<&MemberId>,
) -> Result<()> {
    let name = escape_html(fields.name);

    let clash = members
        .iter()
        .filter(|m| Some(&m.id) != exclude)
        .any(|m| m.collides_with(&name, fields.day, fields.month));

    if clash {
        return Err(Error::Duplicate {
            name,
            day: fields.day,
            month: fields.month,
        });
    }

    Ok(())
}

/// Suggested file name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("roster-birthdays-{}.json", date.format("%Y-%m-%d"))
}
