//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `#[service]` / `#[repository]` 매크로가 생성한 등록 정보를 `inventory`로 수집하고,
//! 타입 이름을 기준으로 싱글톤 인스턴스를 지연 생성/캐싱하는 전역 컨테이너입니다.
//!
//! ## 동작 방식
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[service]    → ServiceRegistration { name: "user_service", .. }
//!    ├─ #[repository] → RepositoryRegistration { name: "profile_repository", .. }
//!    └─ inventory::collect! → 전역 목록에 수집
//!
//! 2. 런타임 초기화
//!    ├─ Database, RedisClient 를 ServiceLocator::set() 으로 직접 등록
//!    └─ ServiceLocator::initialize_all() 로 모든 컴포넌트 선생성
//!
//! 3. 의존성 해결
//!    ├─ Arc<ProfileRepository> 필드 → ServiceLocator::get::<ProfileRepository>()
//!    ├─ "ProfileRepository" → "profile" 로 정규화 후 등록 정보 검색
//!    └─ 생성된 인스턴스는 TypeId 기준으로 캐싱
//! ```
//!
//! 매크로 없이 수동으로 싱글톤을 구성하는 컴포넌트(소셜 로그인 어댑터 등)는
//! `inventory::submit!` 으로 `ServiceRegistration` 을 직접 제출합니다.
//!
//! ## 이름 정규화
//!
//! 등록 이름과 타입 이름은 모두 접미사(`_service`, `_repository`, `Service`, `Repository`)를
//! 떼고, 언더스코어를 제거한 소문자로 비교합니다.
//! 따라서 `social_auth_service` 등록은 `SocialAuthService` 타입과 매칭됩니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// `#[service]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리에서 서비스를 식별하는 이름
    fn name(&self) -> &str;

    /// 서비스 생성 직후 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// `#[repository]` 매크로가 적용된 구조체가 이 trait을 자동 구현합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 데이터 계층 초기화
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수. `Arc<T>` 를 `Box<dyn Any>` 로 감싸서 반환해야 합니다.
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Service", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();

    print_cache_initialized("Repository", cache.len());
    cache
});

/// 등록 이름(`social_auth_service`)을 검색 키(`socialauth`)로 정규화합니다.
fn normalize_registration_name(name: &str) -> String {
    let base = name
        .strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name);

    base.replace('_', "").to_lowercase()
}

/// 타입 경로(`crate::services::users::user_service::UserService`)에서
/// 마지막 세그먼트만 남깁니다.
fn short_type_name(type_name: &str) -> &str {
    match type_name.rfind("::") {
        Some(pos) => &type_name[pos + 2..],
        None => type_name,
    }
}

/// 컴포넌트 종류
#[derive(Debug, Clone, Copy, PartialEq)]
enum ComponentKind {
    Repository,
    Service,
}

/// 타입 이름을 (종류, 검색 키)로 분해합니다.
fn classify_type_name(short_name: &str) -> Option<(ComponentKind, String)> {
    if let Some(entity) = short_name.strip_suffix("Repository") {
        return Some((ComponentKind::Repository, entity.to_lowercase()));
    }
    if let Some(entity) = short_name.strip_suffix("Service") {
        return Some((ComponentKind::Service, entity.to_lowercase()));
    }
    None
}

/// 전역 싱글톤 컨테이너
///
/// 인스턴스는 `TypeId` 로 캐싱되며 생성 중인 타입을 추적하여 순환 참조를 감지합니다.
/// 컨테이너 오류(미등록 타입, 순환 참조)는 애플리케이션 구성 오류이므로 패닉으로 처리합니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 타입 `T` 의 싱글톤 인스턴스를 반환합니다.
    ///
    /// 캐시에 없으면 등록 정보에서 생성자를 찾아 호출합니다.
    ///
    /// # Panics
    ///
    /// * 순환 참조가 감지된 경우
    /// * `#[service]` / `#[repository]` / `ServiceLocator::set()` 어느 쪽으로도 등록되지 않은 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            if !initializing.insert(type_id) {
                log::error!("❌ Circular dependency detected for type: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let result = std::panic::catch_unwind(|| Self::construct::<T>(type_name));

        LOCATOR.initializing.write().unwrap().remove(&type_id);

        match result {
            Ok(instance) => {
                // 생성자 안에서 이미 등록되었을 수 있으므로 기존 인스턴스를 우선
                let mut instances = LOCATOR.instances.write().unwrap();
                let entry = instances
                    .entry(type_id)
                    .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>);
                entry
                    .clone()
                    .downcast::<T>()
                    .unwrap_or(instance)
            }
            Err(e) => {
                log::error!("Failed to create instance for {}: {:?}", type_name, e);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap();
        instances
            .get(&type_id)
            .map(|instance| instance.clone().downcast::<T>().expect("Type mismatch in ServiceLocator"))
    }

    /// 등록 정보로부터 인스턴스를 생성합니다.
    ///
    /// 생성자가 내부에서 다른 의존성을 `get()` 하므로 이 구간에서는 락을 잡지 않습니다.
    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Arc<T> {
        let short_name = short_type_name(type_name);

        let (kind, key) = classify_type_name(short_name).unwrap_or_else(|| {
            panic!("Service not found: {}. Make sure it's registered with #[service] or #[repository] macro, or manually registered with ServiceLocator::set()", type_name)
        });

        let (registration_name, boxed_instance) = match kind {
            ComponentKind::Repository => {
                let registration = REPOSITORY_NAME_CACHE
                    .get(&key)
                    .unwrap_or_else(|| panic!("No repository found for entity: {}", key));
                (registration.name, (registration.constructor)())
            }
            ComponentKind::Service => {
                let registration = SERVICE_NAME_CACHE
                    .get(&key)
                    .unwrap_or_else(|| panic!("No service found for entity: {}", key));
                (registration.name, (registration.constructor)())
            }
        };

        match boxed_instance.downcast::<Arc<T>>() {
            Ok(arc_instance) => (*arc_instance).clone(),
            Err(_) => panic!("Type mismatch for {:?}: {}", kind, registration_name),
        }
    }

    /// 인프라 컴포넌트를 직접 등록합니다.
    ///
    /// ```rust,ignore
    /// ServiceLocator::set(Arc::new(database));
    /// ServiceLocator::set(Arc::new(redis_client));
    /// ServiceLocator::initialize_all().await?;
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        log::info!("📦 Registering: {}", short_type_name(type_name));

        let mut instances = LOCATOR.instances.write().unwrap();
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 타입이 이미 있는지 확인합니다.
    pub fn contains<T: 'static + Send + Sync>() -> bool {
        LOCATOR
            .instances
            .read()
            .unwrap()
            .contains_key(&TypeId::of::<T>())
    }

    /// 모든 리포지토리와 서비스를 선생성합니다.
    ///
    /// 리포지토리를 먼저, 서비스를 나중에 생성합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");

            for registration in repo_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(1, "Repository instances created", repo_count);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");

            for registration in service_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
