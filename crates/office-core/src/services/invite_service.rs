// ============================================================================
// Office Core - Invite Service
// File: crates/office-core/src/services/invite_service.rs
// ============================================================================
//! Invite code issuance and redemption.
//!
//! Authorization for issuance is the caller's job (via `PermissionGate`);
//! this service owns the code lifecycle only.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use office_shared::constants::MAX_CODE_GENERATION_ATTEMPTS;

use crate::domain::{
    AuditLogEntry, InviteCode, Member, Membership, OfficeRole, ACTION_REDEEM_INVITE,
};
use crate::error::DomainError;
use crate::repositories::{AuditRepository, InviteRepository, MemberRepository};
use crate::services::AuditService;

pub struct InviteService<I, M, A>
where
    I: InviteRepository,
    M: MemberRepository,
    A: AuditRepository,
{
    invites: Arc<I>,
    members: Arc<M>,
    audit: Arc<AuditService<A>>,
}

impl<I, M, A> InviteService<I, M, A>
where
    I: InviteRepository,
    M: MemberRepository,
    A: AuditRepository,
{
    pub fn new(invites: Arc<I>, members: Arc<M>, audit: Arc<AuditService<A>>) -> Self {
        Self {
            invites,
            members,
            audit,
        }
    }

    /// Mint a single-use invite code for an office.
    ///
    /// Retries generation on a code-string collision a bounded number of
    /// times before giving up with `GenerationExhausted`.
    pub async fn issue_invite(
        &self,
        office_id: Uuid,
        role: OfficeRole,
        ttl_days: i64,
        issuer_id: Uuid,
    ) -> Result<InviteCode, DomainError> {
        info!(%office_id, role = role.as_str(), ttl_days, "Issuing invite code");

        for attempt in 1..=MAX_CODE_GENERATION_ATTEMPTS {
            let invite = InviteCode::new(office_id, role, issuer_id, ttl_days)?;

            if self.invites.find_by_code(&invite.code).await?.is_some() {
                warn!(attempt, "Invite code collision, regenerating");
                continue;
            }

            self.invites.insert(&invite).await?;
            info!(%office_id, invite_id = %invite.id, "Invite code issued");
            return Ok(invite);
        }

        warn!(%office_id, "Invite code generation exhausted all attempts");
        Err(DomainError::GenerationExhausted)
    }

    /// Redeem a code, creating the membership it grants.
    ///
    /// Expiry is re-checked on every attempt, before the used flag: an
    /// expired-but-unused code can never be redeemed. The mark-used and
    /// member-insert writes happen atomically in the repository, so two
    /// concurrent redemptions of the same code succeed at most once.
    pub async fn redeem_invite(
        &self,
        code: &str,
        user_id: Uuid,
    ) -> Result<Membership, DomainError> {
        let code = InviteCode::normalize(code);

        let invite = self
            .invites
            .find_by_code(&code)
            .await?
            .ok_or(DomainError::InvalidCode)?;

        let now = Utc::now();
        if invite.is_expired(now) {
            warn!(invite_id = %invite.id, "Redemption of expired invite code");
            return Err(DomainError::ExpiredCode);
        }
        if invite.used {
            warn!(invite_id = %invite.id, "Redemption of already used invite code");
            return Err(DomainError::AlreadyUsedCode);
        }
        if self
            .members
            .find_active(invite.office_id, user_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyMember);
        }

        let member = Member::new(invite.office_id, user_id, invite.role);
        self.invites.redeem(invite.id, &member, now).await?;

        info!(
            office_id = %invite.office_id,
            %user_id,
            role = invite.role.as_str(),
            "Invite code redeemed"
        );

        let entry = AuditLogEntry::new(
            user_id,
            invite.office_id,
            ACTION_REDEEM_INVITE,
            "office_invite",
            invite.id,
            None,
            Some(json!({ "code": invite.code, "role": invite.role.as_str() })),
        );
        if let Err(e) = self.audit.record(entry).await {
            // Non-fatal: the membership was created; only the trail is short.
            warn!("Audit write for invite redemption failed: {}", e);
        }

        Ok(Membership {
            office_id: invite.office_id,
            role: invite.role,
            joined_at: member.joined_at,
        })
    }

    /// Outstanding and historical invites for one office.
    pub async fn invites_for_office(
        &self,
        office_id: Uuid,
    ) -> Result<Vec<InviteCode>, DomainError> {
        self.invites.list_by_office(office_id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::repositories::{MockAuditRepository, MockInviteRepository, MockMemberRepository};

    type Service = InviteService<MockInviteRepository, MockMemberRepository, MockAuditRepository>;

    fn service(
        invites: MockInviteRepository,
        members: MockMemberRepository,
        audit: MockAuditRepository,
    ) -> Service {
        InviteService::new(
            Arc::new(invites),
            Arc::new(members),
            Arc::new(AuditService::new(Arc::new(audit))),
        )
    }

    fn fresh_invite(office_id: Uuid) -> InviteCode {
        InviteCode::new(office_id, OfficeRole::Member, Uuid::new_v4(), 7).unwrap()
    }

    #[tokio::test]
    async fn issue_returns_a_well_formed_code() {
        let mut invites = MockInviteRepository::new();
        invites.expect_find_by_code().returning(|_| Ok(None));
        invites.expect_insert().times(1).returning(|_| Ok(()));

        let office_id = Uuid::new_v4();
        let svc = service(invites, MockMemberRepository::new(), MockAuditRepository::new());
        let invite = svc
            .issue_invite(office_id, OfficeRole::Member, 7, Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(invite.office_id, office_id);
        assert_eq!(invite.code.len(), 8);
        assert!(!invite.used);
        assert!(invite.expires_at > Utc::now() + Duration::days(6));
    }

    #[tokio::test]
    async fn issue_retries_on_collision() {
        let mut invites = MockInviteRepository::new();
        let taken = fresh_invite(Uuid::new_v4());
        invites
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(taken.clone())));
        invites.expect_find_by_code().times(1).returning(|_| Ok(None));
        invites.expect_insert().times(1).returning(|_| Ok(()));

        let svc = service(invites, MockMemberRepository::new(), MockAuditRepository::new());
        let result = svc
            .issue_invite(Uuid::new_v4(), OfficeRole::Viewer, 3, Uuid::new_v4())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn issue_gives_up_after_bounded_attempts() {
        let mut invites = MockInviteRepository::new();
        let taken = fresh_invite(Uuid::new_v4());
        invites
            .expect_find_by_code()
            .times(MAX_CODE_GENERATION_ATTEMPTS as usize)
            .returning(move |_| Ok(Some(taken.clone())));

        let svc = service(invites, MockMemberRepository::new(), MockAuditRepository::new());
        let result = svc
            .issue_invite(Uuid::new_v4(), OfficeRole::Member, 7, Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(DomainError::GenerationExhausted)));
    }

    #[tokio::test]
    async fn issue_rejects_out_of_range_ttl() {
        let svc = service(
            MockInviteRepository::new(),
            MockMemberRepository::new(),
            MockAuditRepository::new(),
        );
        let result = svc
            .issue_invite(Uuid::new_v4(), OfficeRole::Member, 0, Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn redeem_unknown_code_is_invalid() {
        let mut invites = MockInviteRepository::new();
        invites.expect_find_by_code().returning(|_| Ok(None));

        let svc = service(invites, MockMemberRepository::new(), MockAuditRepository::new());
        let result = svc.redeem_invite("NOPE1234", Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::InvalidCode)));
    }

    #[tokio::test]
    async fn redeem_checks_expiry_before_used_flag() {
        let mut invite = fresh_invite(Uuid::new_v4());
        invite.expires_at = Utc::now() - Duration::hours(1);
        // Even a used-and-expired code reports expiry first.
        invite.used = true;

        let mut invites = MockInviteRepository::new();
        invites
            .expect_find_by_code()
            .returning(move |_| Ok(Some(invite.clone())));

        let svc = service(invites, MockMemberRepository::new(), MockAuditRepository::new());
        let result = svc.redeem_invite("ABCD1234", Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::ExpiredCode)));
    }

    #[tokio::test]
    async fn redeem_expired_unused_code_fails() {
        let mut invite = fresh_invite(Uuid::new_v4());
        invite.expires_at = Utc::now() - Duration::seconds(1);

        let mut invites = MockInviteRepository::new();
        invites
            .expect_find_by_code()
            .returning(move |_| Ok(Some(invite.clone())));

        let svc = service(invites, MockMemberRepository::new(), MockAuditRepository::new());
        let result = svc.redeem_invite("ABCD1234", Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::ExpiredCode)));
    }

    #[tokio::test]
    async fn redeem_used_code_fails() {
        let mut invite = fresh_invite(Uuid::new_v4());
        invite.mark_used(Uuid::new_v4(), Utc::now());

        let mut invites = MockInviteRepository::new();
        invites
            .expect_find_by_code()
            .returning(move |_| Ok(Some(invite.clone())));

        let svc = service(invites, MockMemberRepository::new(), MockAuditRepository::new());
        let result = svc.redeem_invite("ABCD1234", Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::AlreadyUsedCode)));
    }

    #[tokio::test]
    async fn redeem_by_existing_member_fails() {
        let office_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let invite = fresh_invite(office_id);

        let mut invites = MockInviteRepository::new();
        invites
            .expect_find_by_code()
            .returning(move |_| Ok(Some(invite.clone())));

        let mut members = MockMemberRepository::new();
        members.expect_find_active().returning(move |office, user| {
            Ok(Some(Member::new(office, user, OfficeRole::Viewer)))
        });

        let svc = service(invites, members, MockAuditRepository::new());
        let result = svc.redeem_invite("ABCD1234", user_id).await;
        assert!(matches!(result, Err(DomainError::AlreadyMember)));
    }

    #[tokio::test]
    async fn redeem_success_creates_membership_and_audits() {
        let office_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let invite = fresh_invite(office_id);
        let invite_id = invite.id;

        let mut invites = MockInviteRepository::new();
        invites
            .expect_find_by_code()
            .returning(move |_| Ok(Some(invite.clone())));
        invites
            .expect_redeem()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut members = MockMemberRepository::new();
        members.expect_find_active().returning(|_, _| Ok(None));

        let mut audit = MockAuditRepository::new();
        audit
            .expect_append()
            .times(1)
            .withf(move |entry| {
                entry.action == ACTION_REDEEM_INVITE
                    && entry.office_id == office_id
                    && entry.entity_id == invite_id
            })
            .returning(|_| Ok(()));

        let svc = service(invites, members, audit);
        let membership = svc.redeem_invite("abcd1234", user_id).await.unwrap();
        assert_eq!(membership.office_id, office_id);
        assert_eq!(membership.role, OfficeRole::Member);
    }

    #[tokio::test]
    async fn redeem_loser_of_conditional_write_sees_already_used() {
        let invite = fresh_invite(Uuid::new_v4());

        let mut invites = MockInviteRepository::new();
        invites
            .expect_find_by_code()
            .returning(move |_| Ok(Some(invite.clone())));
        // The store-level CAS reports the concurrent winner.
        invites
            .expect_redeem()
            .returning(|_, _, _| Err(DomainError::AlreadyUsedCode));

        let mut members = MockMemberRepository::new();
        members.expect_find_active().returning(|_, _| Ok(None));

        let svc = service(invites, members, MockAuditRepository::new());
        let result = svc.redeem_invite("ABCD1234", Uuid::new_v4()).await;
        assert!(matches!(result, Err(DomainError::AlreadyUsedCode)));
    }

    #[tokio::test]
    async fn audit_failure_does_not_fail_redemption() {
        let invite = fresh_invite(Uuid::new_v4());

        let mut invites = MockInviteRepository::new();
        invites
            .expect_find_by_code()
            .returning(move |_| Ok(Some(invite.clone())));
        invites.expect_redeem().returning(|_, _, _| Ok(()));

        let mut members = MockMemberRepository::new();
        members.expect_find_active().returning(|_, _| Ok(None));

        let mut audit = MockAuditRepository::new();
        audit
            .expect_append()
            .returning(|_| Err(DomainError::DatabaseError("audit store down".into())));

        let svc = service(invites, members, audit);
        let result = svc.redeem_invite("ABCD1234", Uuid::new_v4()).await;
        assert!(result.is_ok());
    }
}
