//! The shared list account, as seen from this client.
//!
//! Every fetch takes a generation number when it is issued. The applied
//! snapshot only moves forward: a response older than the one already
//! applied is dropped. Writes never touch the snapshot directly; a successful
//! write is followed by exactly one fetch, whose result is what callers see.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use super::*;
use crate::model::{ListSnapshot, decode_entries};
use crate::wallet::Keypair;

#[derive(Debug, Default)]
struct Applied {
    generation: u64,
    snapshot: ListSnapshot,
}

/// Result of [`RemoteListStore::initialize`]: the create call's own outcome
/// plus the snapshot fetched afterwards, whatever that outcome was.
#[derive(Debug)]
pub struct InitializeOutcome {
    pub created: Result<TxReceipt, WriteError>,
    pub snapshot: ListSnapshot,
}

pub struct RemoteListStore<I> {
    invoker: I,
    account: AccountRef,
    account_keypair: Option<Keypair>,
    applied: Mutex<Applied>,
    next_generation: AtomicU64,
}

impl<I: ProgramInvoker> RemoteListStore<I> {
    pub fn new(invoker: I, account: AccountRef) -> Self {
        Self {
            invoker,
            account,
            account_keypair: None,
            applied: Mutex::new(Applied::default()),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Keypair of the list account; it co-signs the create call.
    pub fn with_account_keypair(mut self, keypair: Keypair) -> Self {
        self.account_keypair = Some(keypair);
        self
    }

    pub fn account(&self) -> &AccountRef {
        &self.account
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.lock().snapshot.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Applied> {
        self.applied
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn issue_generation(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst)
    }

    /// Applies `snapshot` unless a newer generation is already applied.
    /// Returns whatever is applied afterwards.
    fn apply(&self, generation: u64, snapshot: ListSnapshot) -> ListSnapshot {
        let mut applied = self.lock();
        if generation < applied.generation {
            debug!(
                generation,
                applied = applied.generation,
                "discarding stale fetch"
            );
            return applied.snapshot.clone();
        }
        applied.generation = generation;
        applied.snapshot = snapshot;
        applied.snapshot.clone()
    }

    /// Forgets the current snapshot; fetches still in flight are discarded.
    pub fn reset(&self) {
        let generation = self.issue_generation();
        self.apply(generation, ListSnapshot::Unknown);
    }

    pub async fn fetch(&self) -> ListSnapshot {
        let generation = self.issue_generation();
        let fetched = match self.invoker.fetch_account(&self.account).await {
            Ok(Some(payload)) => match decode_entries(payload) {
                Ok(entries) => ListSnapshot::Resolved(entries),
                Err(err) => {
                    warn!(account = %self.account, error = %err, "undecodable list account");
                    ListSnapshot::Unavailable {
                        reason: err.to_string(),
                    }
                }
            },
            Ok(None) => ListSnapshot::NotFound,
            Err(err) => {
                warn!(account = %self.account, error = %err, "fetch list account failed");
                ListSnapshot::Unavailable {
                    reason: err.to_string(),
                }
            }
        };
        debug!(generation, state = fetched.label(), "fetched list account");
        self.apply(generation, fetched)
    }

    async fn submit<A: Authority>(
        &self,
        authority: &A,
        call: ProgramCall,
    ) -> Result<TxReceipt, WriteError> {
        let summary = call.summary();
        let invocation = self.invocation(authority.identity(), call);
        let message = invocation.message()?;

        let mut signatures = vec![SignatureEntry {
            signer: authority.identity().to_string(),
            signature: authority.sign(&message, &summary).await?,
        }];
        if matches!(invocation.call, ProgramCall::CreateList) {
            if let Some(keypair) = &self.account_keypair {
                signatures.push(SignatureEntry {
                    signer: keypair.public_hex(),
                    signature: keypair.sign_hex(&message),
                });
            }
        }

        let signed = SignedInvocation {
            invocation,
            signatures,
        };
        Ok(self.invoker.invoke(&signed).await?)
    }

    fn invocation(&self, payer: &Identity, call: ProgramCall) -> Invocation {
        let list = AccountMeta {
            pubkey: self.account.to_string(),
            is_signer: false,
            is_writable: true,
        };
        let authority = AccountMeta {
            pubkey: payer.to_string(),
            is_signer: true,
            is_writable: matches!(call, ProgramCall::CreateList),
        };
        let accounts = match call {
            ProgramCall::CreateList => vec![
                AccountMeta {
                    is_signer: self.account_keypair.is_some(),
                    ..list
                },
                authority,
                AccountMeta {
                    pubkey: SYSTEM_PROGRAM.to_string(),
                    is_signer: false,
                    is_writable: false,
                },
            ],
            _ => vec![list, authority],
        };
        Invocation {
            call,
            accounts,
            payer: payer.clone(),
        }
    }

    /// Follows a successful write with the one mandatory refetch.
    async fn settle<A: Authority>(
        &self,
        authority: &A,
        method: &str,
        result: Result<TxReceipt, WriteError>,
    ) -> Result<ListSnapshot, WriteError> {
        match result {
            Ok(receipt) if authority.is_live() => {
                debug!(method, signature = %receipt.signature, "write confirmed");
                Ok(self.fetch().await)
            }
            Ok(receipt) => {
                info!(method, signature = %receipt.signature, "session ended; discarding write result");
                Err(WriteError::SessionEnded)
            }
            Err(err) => {
                warn!(method, error = %err, "write failed");
                Err(err)
            }
        }
    }

    /// Creates the list account. A rejection usually means someone else
    /// already created it, so the account is fetched either way.
    pub async fn initialize<A: Authority>(&self, authority: &A) -> InitializeOutcome {
        let created = self.submit(authority, ProgramCall::CreateList).await;
        match &created {
            Ok(receipt) => info!(account = %self.account, signature = %receipt.signature, "list account created"),
            Err(err) => info!(account = %self.account, error = %err, "create list rejected; fetching anyway"),
        }
        if !authority.is_live() {
            return InitializeOutcome {
                created: created.and(Err(WriteError::SessionEnded)),
                snapshot: self.snapshot(),
            };
        }
        InitializeOutcome {
            created,
            snapshot: self.fetch().await,
        }
    }

    pub async fn append<A: Authority>(
        &self,
        authority: &A,
        link: &str,
    ) -> Result<ListSnapshot, WriteError> {
        if link.trim().is_empty() {
            return Err(WriteError::EmptyLink);
        }
        let call = ProgramCall::AppendEntry {
            link: link.to_string(),
        };
        let result = self.submit(authority, call).await;
        self.settle(authority, "append_entry", result).await
    }

    /// `index` is a position in the currently applied snapshot.
    pub async fn upvote<A: Authority>(
        &self,
        authority: &A,
        index: usize,
    ) -> Result<ListSnapshot, WriteError> {
        let entry_id = {
            let applied = self.lock();
            let entries = applied.snapshot.entries().unwrap_or_default();
            match entries.get(index) {
                Some(entry) => entry.id,
                None => {
                    return Err(WriteError::NoSuchEntry {
                        index,
                        len: entries.len(),
                    });
                }
            }
        };
        let call = ProgramCall::IncrementUpvote {
            index: index as u64,
            entry_id,
        };
        let result = self.submit(authority, call).await;
        self.settle(authority, "increment_upvote", result).await
    }
}

#[cfg(test)]
#[path = "../tests/remote/store_tests.rs"]
mod tests;
