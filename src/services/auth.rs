//! Hosted identity service contract and the client-side email guard.
//!
//! The identity service owns credentials, sessions and their persistence.
//! This module only names the calls the front-end makes and rejects obviously
//! fake addresses before any request leaves the browser.
//!
//! The concrete [`AuthClient`] adapter ships with the hosted service's
//! browser client; this crate only wraps it in [`GuardedAuth`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domains rejected at sign-in and sign-up.
pub const BLOCKED_EMAIL_DOMAINS: [&str; 4] = ["example.com", "test.com", "fake.com", "dummy.com"];

/// Errors surfaced by the identity service or the client-side guard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
	/// Address on [`BLOCKED_EMAIL_DOMAINS`].
	#[error("Please use a real email domain like gmail.com or outlook.com (got {0})")]
	BlockedDomain(String),

	/// Address without an `@domain` part.
	#[error("Email address has no domain")]
	MissingDomain,

	/// Wrong email or password.
	#[error("Invalid login credentials")]
	InvalidCredentials,

	/// Sign-up for an existing account.
	#[error("User already registered")]
	AlreadyRegistered,

	/// The service could not be reached.
	#[error("Network error: {0}")]
	Network(String),

	/// Any other service-side failure.
	#[error("Auth service error: {0}")]
	Service(String),
}

/// Authenticated user as reported by the identity service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
	/// Service-assigned user id.
	pub id: String,
	/// Sign-in address.
	pub email: String,
	/// Name given at sign-up.
	#[serde(default)]
	pub display_name: Option<String>,
}

/// An active session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
	/// Bearer token for data requests.
	pub access_token: String,
	/// Signed-in user.
	pub user: User,
	/// Unix seconds.
	#[serde(default)]
	pub expires_at: Option<i64>,
}

/// Extra profile data stored with a new account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFields {
	/// Name shown in the header.
	pub display_name: String,
}

/// What changed in a session notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
	/// A session started.
	SignedIn,
	/// The session ended.
	SignedOut,
	/// The access token was renewed.
	TokenRefreshed,
	/// Profile data changed.
	UserUpdated,
}

/// Callback invoked on every session change.
pub type SessionListener = Box<dyn Fn(SessionEvent, Option<&Session>)>;

/// Handle returned by [`AuthClient::on_session_change`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(
	/// Listener id.
	pub u64,
);

/// Calls the front-end makes against the hosted identity service.
pub trait AuthClient {
	/// Creates an account and signs it in.
	fn sign_up(
		&self,
		email: &str,
		password: &str,
		profile: &ProfileFields,
	) -> Result<Session, AuthError>;

	/// Starts a session with email and password.
	fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

	/// Ends the current session, if any.
	fn sign_out(&self);

	/// The restored or active session.
	fn current_session(&self) -> Option<Session>;

	/// Registers `listener` for every later session change.
	fn on_session_change(&self, listener: SessionListener) -> Subscription;

	/// Removes a listener registered with [`AuthClient::on_session_change`].
	fn unsubscribe(&self, subscription: Subscription);
}

/// Rejects addresses without a domain or with a blocked one (case-insensitive).
pub fn validate_email_domain(email: &str) -> Result<(), AuthError> {
	let domain = email
		.split('@')
		.nth(1)
		.map(|d| d.trim().to_lowercase())
		.filter(|d| !d.is_empty())
		.ok_or(AuthError::MissingDomain)?;

	if BLOCKED_EMAIL_DOMAINS.contains(&domain.as_str()) {
		return Err(AuthError::BlockedDomain(domain));
	}
	Ok(())
}

/// Wraps an [`AuthClient`] so sign-in and sign-up run the email guard first.
pub struct GuardedAuth<C> {
	inner: C,
}

impl<C: AuthClient> GuardedAuth<C> {
	/// Guards `inner`.
	pub fn new(inner: C) -> Self {
		Self { inner }
	}

	/// The wrapped client.
	pub fn inner(&self) -> &C {
		&self.inner
	}

	/// [`AuthClient::sign_up`] after the email guard.
	pub fn sign_up(
		&self,
		email: &str,
		password: &str,
		profile: &ProfileFields,
	) -> Result<Session, AuthError> {
		validate_email_domain(email)?;
		log::info!("tender-ai: signing up {}", profile.display_name);
		self.inner.sign_up(email, password, profile).inspect_err(|e| {
			log::warn!("tender-ai: sign up failed: {}", e);
		})
	}

	/// [`AuthClient::sign_in`] after the email guard.
	pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
		validate_email_domain(email)?;
		self.inner.sign_in(email, password).inspect_err(|e| {
			log::warn!("tender-ai: sign in failed: {}", e);
		})
	}

	/// See [`AuthClient::sign_out`].
	pub fn sign_out(&self) {
		self.inner.sign_out();
	}

	/// See [`AuthClient::current_session`].
	pub fn current_session(&self) -> Option<Session> {
		self.inner.current_session()
	}

	/// See [`AuthClient::on_session_change`].
	pub fn on_session_change(&self, listener: SessionListener) -> Subscription {
		self.inner.on_session_change(listener)
	}

	/// See [`AuthClient::unsubscribe`].
	pub fn unsubscribe(&self, subscription: Subscription) {
		self.inner.unsubscribe(subscription);
	}
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::rc::Rc;

	use super::*;

	/// Accepts one fixed account and records every call it receives.
	#[derive(Default)]
	struct FakeIdentity {
		calls: Cell<usize>,
		session: RefCell<Option<Session>>,
		listeners: RefCell<Vec<(Subscription, SessionListener)>>,
	}

	impl FakeIdentity {
		fn notify(&self, event: SessionEvent) {
			let session = self.session.borrow();
			for (_, listener) in self.listeners.borrow().iter() {
				listener(event, session.as_ref());
			}
		}

		fn session_for(email: &str) -> Session {
			Session {
				access_token: "token".into(),
				user: User {
					id: "u1".into(),
					email: email.into(),
					display_name: None,
				},
				expires_at: None,
			}
		}
	}

	impl AuthClient for FakeIdentity {
		fn sign_up(
			&self,
			email: &str,
			_password: &str,
			profile: &ProfileFields,
		) -> Result<Session, AuthError> {
			self.calls.set(self.calls.get() + 1);
			let mut session = Self::session_for(email);
			session.user.display_name = Some(profile.display_name.clone());
			Ok(session)
		}

		fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
			self.calls.set(self.calls.get() + 1);
			if password != "hunter22" {
				return Err(AuthError::InvalidCredentials);
			}
			*self.session.borrow_mut() = Some(Self::session_for(email));
			self.notify(SessionEvent::SignedIn);
			Ok(Self::session_for(email))
		}

		fn sign_out(&self) {
			*self.session.borrow_mut() = None;
			self.notify(SessionEvent::SignedOut);
		}

		fn current_session(&self) -> Option<Session> {
			self.session.borrow().clone()
		}

		fn on_session_change(&self, listener: SessionListener) -> Subscription {
			let id = Subscription(self.listeners.borrow().len() as u64);
			self.listeners.borrow_mut().push((id, listener));
			id
		}

		fn unsubscribe(&self, subscription: Subscription) {
			self.listeners.borrow_mut().retain(|(id, _)| *id != subscription);
		}
	}

	#[test]
	fn blocked_domains_are_rejected_case_insensitively() {
		assert_eq!(
			validate_email_domain("someone@Example.COM"),
			Err(AuthError::BlockedDomain("example.com".into()))
		);
		for domain in BLOCKED_EMAIL_DOMAINS {
			assert!(validate_email_domain(&format!("a@{domain}")).is_err());
		}
	}

	#[test]
	fn missing_domain_is_rejected() {
		assert_eq!(validate_email_domain("nobody"), Err(AuthError::MissingDomain));
		assert_eq!(validate_email_domain("nobody@"), Err(AuthError::MissingDomain));
	}

	#[test]
	fn real_domains_pass() {
		assert_eq!(validate_email_domain("buyer@gmail.com"), Ok(()));
		assert_eq!(validate_email_domain("ops@examples.com"), Ok(()));
	}

	#[test]
	fn guard_short_circuits_before_the_service() {
		let auth = GuardedAuth::new(FakeIdentity::default());
		let result = auth.sign_in("bot@fake.com", "hunter22");
		assert!(matches!(result, Err(AuthError::BlockedDomain(_))));
		assert_eq!(auth.inner().calls.get(), 0);
	}

	#[test]
	fn service_errors_pass_through() {
		let auth = GuardedAuth::new(FakeIdentity::default());
		assert_eq!(
			auth.sign_in("buyer@gmail.com", "wrong"),
			Err(AuthError::InvalidCredentials)
		);
		assert_eq!(auth.inner().calls.get(), 1);
		assert_eq!(auth.current_session(), None);
	}

	#[test]
	fn sign_up_carries_profile() {
		let auth = GuardedAuth::new(FakeIdentity::default());
		let profile = ProfileFields {
			display_name: "Procurement Team".into(),
		};
		let session = auth.sign_up("team@company.org", "secret", &profile).unwrap();
		assert_eq!(session.user.display_name.as_deref(), Some("Procurement Team"));
	}

	#[test]
	fn listeners_see_sign_in_and_sign_out() {
		let auth = GuardedAuth::new(FakeIdentity::default());
		let events = Rc::new(RefCell::new(Vec::new()));
		let seen = events.clone();
		let sub = auth.on_session_change(Box::new(move |event, session| {
			seen.borrow_mut().push((event, session.is_some()));
		}));

		auth.sign_in("buyer@gmail.com", "hunter22").unwrap();
		assert!(auth.current_session().is_some());
		auth.sign_out();
		auth.unsubscribe(sub);
		auth.sign_in("buyer@gmail.com", "hunter22").unwrap();

		assert_eq!(
			*events.borrow(),
			vec![(SessionEvent::SignedIn, true), (SessionEvent::SignedOut, false)]
		);
	}
}
