//! 퀴즈 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 GitHub OAuth + JWT 인증 REST API를 제공합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use env_logger::Env;
use log::{error, info, warn};
use quiz_auth_backend::caching::redis::RedisClient;
use quiz_auth_backend::config::{GitHubSettings, JwtSettings, OAuthStateSettings, RateLimitConfig, ServerConfig};
use quiz_auth_backend::core::AppState;
use quiz_auth_backend::db::Database;
use quiz_auth_backend::errors::AppError;
use quiz_auth_backend::repositories::users::MongoUserRepository;
use quiz_auth_backend::routes::configure_all_routes;
use quiz_auth_backend::services::auth::GitHubClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env 의 RUST_LOG 가 적용되도록 먼저 읽고, 결과는 로거 초기화 뒤에 기록
    let env_file = load_env_file();
    init_logging();
    env_file.log();

    info!("🚀 퀴즈 인증 서비스 시작중...");

    let state = build_app_state().await.map_err(|e| {
        error!("❌ 서비스 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(web::Data::new(state)).await
}

/// 설정 스냅샷과 저장소 연결로 `AppState` 를 조립합니다
///
/// # Errors
///
/// * `AppError::ConfigError` - JWT 비밀키, OAuth state 비밀키, GitHub 클라이언트 정보 누락
/// * `AppError::DatabaseError` - MongoDB 연결 또는 인덱스 생성 실패
async fn build_app_state() -> Result<AppState, AppError> {
    let jwt = JwtSettings::from_env()?;
    let github = GitHubSettings::from_env()?;
    let oauth_state = OAuthStateSettings::from_env()?;

    let (database, redis_client) = initialize_data_stores().await?;

    let users = MongoUserRepository::new(&database, redis_client);
    users.create_indexes().await?;

    let provider = GitHubClient::new(github.clone())?;

    Ok(AppState::new(&jwt, Arc::new(users), Arc::new(provider), github, oauth_state))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 GitHub 로그인: http://{}/auth/github/login", bind_address);

    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4)
        .run()
        .await
}

/// `.env` 파일 로드 결과
struct EnvFileLoad {
    profile: String,
    file: &'static str,
    result: Result<(), String>,
}

impl EnvFileLoad {
    fn log(&self) {
        info!("Current profile: {}", self.profile);
        match &self.result {
            Ok(()) => info!("{} 파일 로드 됨", self.file),
            Err(e) => warn!("{} 파일 로드 실패: {}", self.file, e),
        }
    }
}

/// 프로필별 설정 파일 이름
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn env_file_for(profile: &str) -> &'static str {
    match profile {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => ".env",
    }
}

/// 환경별 설정 파일을 로드합니다
///
/// 로거가 아직 없으므로 결과를 돌려주고 기록은 호출한 쪽에서 합니다.
fn load_env_file() -> EnvFileLoad {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());
    let file = env_file_for(&profile);
    let result = dotenv::from_filename(file)
        .map(|_| ())
        .map_err(|e| e.to_string());

    EnvFileLoad { profile, file, result }
}

/// 로깅 시스템을 초기화합니다
///
/// ```bash
/// # 토큰 검증 실패 사유까지 보기
/// RUST_LOG=info,quiz_auth_backend=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// MongoDB 연결 실패는 치명적이지만, Redis 는 캐시 용도이므로 실패하면 캐시 없이 진행합니다.
async fn initialize_data_stores() -> Result<(Database, Option<RedisClient>), AppError> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::connect().await?;
    info!("✅ MongoDB 연결 성공: {}", database.database_name());

    let redis_client = match RedisClient::connect().await {
        Ok(client) => {
            info!("✅ Redis 연결 성공");
            Some(client)
        }
        Err(e) => {
            warn!("⚠️ Redis 연결 실패, 캐시 없이 진행: {}", e);
            None
        }
    };

    Ok((database, redis_client))
}

/// CORS 설정을 구성합니다
///
/// * `http://localhost:3000` - 퀴즈 프론트엔드 개발 서버
/// * `http://localhost:8080` - 자체 서버
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
