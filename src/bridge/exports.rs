//! Native methods of `ludii_rust_ai.LudiiKriegspielRustAI`.
//!
//! Every export runs its body under [`guard`]: errors and panics never cross
//! the boundary as such, they surface to the host as a thrown
//! `RuntimeException` and a null or false return, and the host's own game
//! abort logic takes over from there.
use super::bindings::Bindings;
use super::jvm::Jvm;
use super::wrappers::*;
use crate::agent::{self, Agent};
use crate::cache::Cache;
use crate::config::{self, Config, RUNTIME_EXCEPTION};
use crate::policy::Uniform;
use crate::registry::{Registry, UNBOUND};
use crate::turn::Limits;
use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jdouble, jint, jlong, jobject};
use std::cell::RefCell;
use std::panic::AssertUnwindSafe;

static CONFIG: Cache<Config> = Cache::new();
static BINDINGS: Cache<Bindings> = Cache::new();
static AGENTS: Registry<Agent> = Registry::new();

#[unsafe(no_mangle)]
pub extern "system" fn Java_ludii_1rust_1ai_LudiiKriegspielRustAI_nativeStaticInit<'local>(
    env: JNIEnv<'local>,
    class: JClass<'local>,
) {
    guard(env, "static init", (), |cell| {
        let settings = *CONFIG.install(|| {
            let (settings, rejected) = Config::from_env();
            config::log(settings.level);
            rejected.iter().for_each(|r| log::warn!("{}", r));
            Ok(settings)
        })?;
        BINDINGS.install(|| Bindings::resolve(&mut cell.borrow_mut(), &class))?;
        log::info!(
            "{} {} loaded ({:?})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            settings
        );
        Ok(())
    })
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_ludii_1rust_1ai_LudiiKriegspielRustAI_nativeInitAI<'local>(
    env: JNIEnv<'local>,
    this: JObject<'local>,
    game: JObject<'local>,
    player: jint,
) {
    guard(env, "init", (), |cell| {
        let jvm = Jvm::new(cell, BINDINGS.get()?);
        let game = JavaGame::wrap(jvm, &game)?;
        let seed = CONFIG
            .get()?
            .seed
            .map(|seed| seed.wrapping_add(player as u64));
        let mut agent = Agent::new(Uniform, seed);
        agent.init(&game, player)?;
        release(jvm, &this)?;
        let handle = AGENTS.insert(agent)?;
        log::debug!("bound handle {} ({} live)", handle, AGENTS.len());
        jvm.set_handle(&this, handle)
    })
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_ludii_1rust_1ai_LudiiKriegspielRustAI_nativeSelectAction<'local>(
    env: JNIEnv<'local>,
    this: JObject<'local>,
    game: JObject<'local>,
    context: JObject<'local>,
    seconds: jdouble,
    iterations: jint,
    depth: jint,
    last_try: JString<'local>,
    referee: JString<'local>,
) -> jobject {
    guard(env, "select", std::ptr::null_mut(), |cell| {
        let jvm = Jvm::new(cell, BINDINGS.get()?);
        let agent = AGENTS.get(jvm.handle(&this)?)?;
        let mut agent = agent
            .lock()
            .map_err(|_| anyhow::anyhow!("agent poisoned by an earlier panic"))?;
        let game = JavaGame::wrap(jvm, &game)?;
        let state = JavaState::wrap(&game, context)?;
        let last_try = jvm.string(&last_try)?;
        let referee = jvm.string(&referee)?;
        let limits = Limits {
            seconds,
            iterations,
            depth,
        };
        Ok(agent
            .select(&state, limits, &last_try, &referee)?
            .into_raw())
    })
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_ludii_1rust_1ai_LudiiKriegspielRustAI_nativeCloseAI<'local>(
    env: JNIEnv<'local>,
    this: JObject<'local>,
) {
    guard(env, "close", (), |cell| {
        let jvm = Jvm::new(cell, BINDINGS.get()?);
        if let Ok(agent) = AGENTS.get(jvm.handle(&this)?) {
            agent
                .lock()
                .map_err(|_| anyhow::anyhow!("agent poisoned by an earlier panic"))?
                .close();
        }
        release(jvm, &this)
    })
}

/// Called from the host object's cleaner once it becomes unreachable, with
/// the handle it last held. Dead handles are ignored, so a cleaner running
/// after `closeAI` is harmless.
#[unsafe(no_mangle)]
pub extern "system" fn Java_ludii_1rust_1ai_LudiiKriegspielRustAI_nativeRelease<'local>(
    env: JNIEnv<'local>,
    _: JClass<'local>,
    handle: jlong,
) {
    guard(env, "release", (), |_| {
        if handle != UNBOUND && AGENTS.remove(handle)? {
            log::debug!("released unreachable handle {} ({} live)", handle, AGENTS.len());
        }
        Ok(())
    })
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_ludii_1rust_1ai_LudiiKriegspielRustAI_nativeSupportsGame<'local>(
    env: JNIEnv<'local>,
    _: JObject<'local>,
    game: JObject<'local>,
) -> jboolean {
    guard(env, "supports", JNI_FALSE, |cell| {
        let jvm = Jvm::new(cell, BINDINGS.get()?);
        let game = JavaGame::wrap(jvm, &game)?;
        match agent::supports(&game)? {
            true => Ok(JNI_TRUE),
            false => Ok(JNI_FALSE),
        }
    })
}

/// Drop whatever agent the host object currently points at.
fn release(jvm: Jvm<'_, '_>, this: &JObject<'_>) -> anyhow::Result<()> {
    match jvm.handle(this)? {
        UNBOUND => Ok(()),
        handle => {
            AGENTS.remove(handle)?;
            jvm.set_handle(this, UNBOUND)
        }
    }
}

/// Run one export body, converting failure into a pending Java exception.
fn guard<'local, T>(
    env: JNIEnv<'local>,
    entry: &str,
    fallback: T,
    body: impl FnOnce(&RefCell<JNIEnv<'local>>) -> anyhow::Result<T>,
) -> T {
    let cell = RefCell::new(env);
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| body(&cell)));
    let ref mut env = cell.into_inner();
    let message = match outcome {
        Ok(Ok(value)) => return value,
        Ok(Err(e)) => format!("{} failed: {:#}", entry, e),
        Err(panic) => format!(
            "{} panicked: {}",
            entry,
            panic
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("unknown cause")
        ),
    };
    log::error!("{}", message);
    if let Err(e) = env.throw_new(RUNTIME_EXCEPTION, &message) {
        log::error!("could not raise {}: {}", RUNTIME_EXCEPTION, e);
    }
    fallback
}
