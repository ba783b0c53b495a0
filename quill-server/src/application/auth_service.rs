use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{Credentials, Registration, User};
use crate::infrastructure::jwt::JwtService;

#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: JwtService,
}

impl<R: UserRepository> AuthService<R> {
    // проверяется вместо настоящего хеша, когда пользователя нет
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$cXVpbGwtZHVtbXktc2FsdA$xZJPrpNWDRSqwHWxDTQ5ExrUYuX6bvlJuk0k3k1jtNI";

    pub(crate) fn new(repo: R, jwt: JwtService) -> Self {
        Self { repo, jwt }
    }

    pub(crate) async fn register(&self, registration: Registration) -> Result<Session, DomainError> {
        let registration = registration.validate()?;
        let password_hash = hash_password(&registration.password)?;

        let user = self
            .repo
            .create_user(NewUser {
                username: registration.username,
                email: registration.email,
                password_hash,
            })
            .await?;

        self.open_session(user)
    }

    pub(crate) async fn login(&self, credentials: Credentials) -> Result<Session, DomainError> {
        let credentials = credentials.validate()?;

        let Some(stored) = self.repo.find_credentials(&credentials.username).await? else {
            match verify_password(&credentials.password, Self::DUMMY_PASSWORD_HASH) {
                Ok(()) | Err(DomainError::InvalidCredentials) => {}
                Err(err) => return Err(err),
            }
            return Err(DomainError::InvalidCredentials);
        };

        verify_password(&credentials.password, &stored.password_hash)?;
        self.open_session(stored.user)
    }

    fn open_session(&self, user: User) -> Result<Session, DomainError> {
        let access_token = self
            .jwt
            .generate_token(user.id, &user.username)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(Session { user, access_token })
    }
}

pub(crate) fn hash_password(raw_password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = argon2()?
        .hash_password(raw_password.as_bytes(), &salt)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(password_hash.to_string())
}

fn verify_password(raw_password: &str, password_hash: &str) -> Result<(), DomainError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|err| DomainError::Unexpected(err.to_string()))?;
    argon2()?
        .verify_password(raw_password.as_bytes(), &parsed_hash)
        .map_err(|err| match err {
            PasswordHashError::Password => DomainError::InvalidCredentials,
            _ => DomainError::Unexpected(err.to_string()),
        })
}

fn argon2() -> Result<Argon2<'static>, DomainError> {
    let params = Params::new(19 * 1024, 2, 1, None)
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::{AuthService, hash_password};
    use crate::data::user_repository::{NewUser, StoredCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{Credentials, Registration, User};
    use crate::infrastructure::jwt::JwtService;

    #[derive(Clone, Default)]
    struct FakeUserRepo {
        created: Arc<Mutex<Option<NewUser>>>,
        stored: Arc<Mutex<Option<StoredCredentials>>>,
        create_error: Arc<Mutex<Option<DomainError>>>,
    }

    impl FakeUserRepo {
        fn store(&self, creds: StoredCredentials) {
            *self.stored.lock().expect("stored mutex poisoned") = Some(creds);
        }

        fn fail_create_with(&self, err: DomainError) {
            *self.create_error.lock().expect("create_error mutex poisoned") = Some(err);
        }

        fn created(&self) -> Option<NewUser> {
            self.created.lock().expect("created mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            if let Some(err) = self
                .create_error
                .lock()
                .expect("create_error mutex poisoned")
                .take()
            {
                return Err(err);
            }
            let user = sample_user(7, &input.username, &input.email);
            *self.created.lock().expect("created mutex poisoned") = Some(input);
            Ok(user)
        }

        async fn find_credentials(
            &self,
            username: &str,
        ) -> Result<Option<StoredCredentials>, DomainError> {
            Ok(self
                .stored
                .lock()
                .expect("stored mutex poisoned")
                .clone()
                .filter(|creds| creds.user.username == username))
        }
    }

    #[tokio::test]
    async fn register_hashes_password_and_issues_token() {
        let repo = FakeUserRepo::default();
        let service = AuthService::new(repo.clone(), test_jwt());

        let session = service
            .register(Registration {
                username: "  writer  ".to_string(),
                email: " Writer@Example.com ".to_string(),
                password: "correct-horse-battery".to_string(),
            })
            .await
            .expect("register must succeed");

        assert_eq!(session.user.username, "writer");
        let claims = test_jwt()
            .verify_token(&session.access_token)
            .expect("token must verify");
        assert_eq!(claims.sub, 7);

        let created = repo.created().expect("create_user must be called");
        assert_eq!(created.email, "writer@example.com");
        assert!(created.password_hash.starts_with("$argon2id$"));
        assert_ne!(created.password_hash, "correct-horse-battery");
    }

    #[tokio::test]
    async fn register_surfaces_duplicate_username() {
        let repo = FakeUserRepo::default();
        repo.fail_create_with(DomainError::AlreadyExists("username".to_string()));
        let service = AuthService::new(repo, test_jwt());

        let err = service
            .register(Registration {
                username: "writer".to_string(),
                email: "writer@example.com".to_string(),
                password: "correct-horse-battery".to_string(),
            })
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn login_rejects_unknown_user() {
        let service = AuthService::new(FakeUserRepo::default(), test_jwt());

        let err = service
            .login(credentials("ghost", "whatever-password"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let repo = FakeUserRepo::default();
        repo.store(stored("writer", "correct-password"));
        let service = AuthService::new(repo, test_jwt());

        let err = service
            .login(credentials("writer", "wrong-password"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_accepts_valid_password() {
        let repo = FakeUserRepo::default();
        repo.store(stored("writer", "correct-password"));
        let service = AuthService::new(repo, test_jwt());

        let session = service
            .login(credentials("writer", "correct-password"))
            .await
            .expect("login must succeed");
        assert_eq!(session.user.id, 7);
        assert!(!session.access_token.is_empty());
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn stored(username: &str, password: &str) -> StoredCredentials {
        StoredCredentials {
            user: sample_user(7, username, "writer@example.com"),
            password_hash: hash_password(password).expect("hash must be created"),
        }
    }

    fn sample_user(id: i64, username: &str, email: &str) -> User {
        User::new(id, username, email, Utc::now()).expect("sample user must be valid")
    }

    fn test_jwt() -> JwtService {
        JwtService::new("0123456789abcdef0123456789abcdef", 3600)
    }
}
