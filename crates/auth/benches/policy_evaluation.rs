use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::{Duration, Utc};
use gatehouse_auth::{
    ClaimSet, CredentialVerifier, Hs256Verifier, PathParams, Role, RouteConfig, Scope, evaluate,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

const SECRET: &str = "bench-secret";

fn bearer_for(claims: &ClaimSet) -> String {
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {token}")
}

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("credential_verification");

    let verifier = Hs256Verifier::new(SECRET);
    let claims = ClaimSet::new("1", Role::User, Utc::now() + Duration::hours(1));
    let valid = bearer_for(&claims);
    let mut tampered = valid.clone();
    tampered.pop();
    tampered.push('x');

    group.bench_function("valid_token", |b| {
        b.iter(|| verifier.verify(black_box(&valid)))
    });
    group.bench_function("tampered_token", |b| {
        b.iter(|| verifier.verify(black_box(&tampered)))
    });

    group.finish();
}

fn bench_policy_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_chain");

    let claims = ClaimSet::new("1", Role::User, Utc::now() + Duration::hours(1));
    let params: PathParams = [("id".to_string(), "1".to_string()), ("user_id".to_string(), "1".to_string())]
        .into_iter()
        .collect();

    let routes = [
        ("authenticated", RouteConfig::authenticated()),
        ("roles", RouteConfig::authenticated().roles([Role::User, Role::Admin])),
        (
            "roles_scopes",
            RouteConfig::authenticated()
                .roles([Role::User, Role::Admin])
                .scopes([Scope::UserReadSelf, Scope::AdminReadAll]),
        ),
        (
            "full_chain",
            RouteConfig::authenticated()
                .roles([Role::User, Role::Admin])
                .scopes([Scope::UserReadSelf, Scope::AdminReadAll])
                .owner_param("user_id"),
        ),
    ];

    for (name, route) in &routes {
        group.bench_with_input(BenchmarkId::new("admit", name), route, |b, route| {
            b.iter(|| evaluate(black_box(route), Some(&claims), black_box(&params)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_verification, bench_policy_chain);
criterion_main!(benches);
