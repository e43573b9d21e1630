use super::jvm::checked;
use crate::config::*;
use anyhow::Context;
use jni::JNIEnv;
use jni::objects::*;

/// Host classes and member ids, resolved once per process in static init
/// and read-only afterward.
pub struct Bindings {
    game_wrapper: GlobalRef,
    state_wrapper: GlobalRef,

    pub game_ctor: JMethodID,
    pub is_stochastic: JMethodID,
    pub is_imperfect_information: JMethodID,
    pub is_simultaneous_move: JMethodID,
    pub num_players: JMethodID,

    pub state_ctor: JMethodID,
    pub is_terminal: JMethodID,
    pub legal_moves: JMethodID,
    pub apply_move: JMethodID,
    pub current_player: JMethodID,
    pub run_random_playout: JMethodID,
    pub returns: JMethodID,

    pub score: JMethodID,

    pub from: JFieldID,
    pub to: JFieldID,
    pub what: JMethodID,
    pub description: JMethodID,

    pub handle: JFieldID,
}

impl Bindings {
    /// `agent` is the host-side adapter class, which carries the handle field.
    pub fn resolve(env: &mut JNIEnv, agent: &JClass) -> anyhow::Result<Self> {
        let game_wrapper = Self::global(env, GAME_WRAPPER)?;
        let state_wrapper = Self::global(env, STATE_WRAPPER)?;
        let context = Self::class(env, CONTEXT)?;
        let action = Self::class(env, MOVE)?;
        let game = <&JClass>::from(game_wrapper.as_obj());
        let state = <&JClass>::from(state_wrapper.as_obj());
        let bindings = Self {
            game_ctor: Self::method(env, game, "<init>", SIG_GAME_WRAPPER_CTOR)?,
            is_stochastic: Self::method(env, game, "isStochasticGame", SIG_BOOLEAN)?,
            is_imperfect_information: Self::method(env, game, "isImperfectInformationGame", SIG_BOOLEAN)?,
            is_simultaneous_move: Self::method(env, game, "isSimultaneousMoveGame", SIG_BOOLEAN)?,
            num_players: Self::method(env, game, "numPlayers", SIG_INT)?,

            state_ctor: Self::method(env, state, "<init>", SIG_STATE_WRAPPER_CTOR)?,
            is_terminal: Self::method(env, state, "isTerminal", SIG_BOOLEAN)?,
            legal_moves: Self::method(env, state, "legalMovesArray", SIG_LEGAL_MOVES)?,
            apply_move: Self::method(env, state, "applyMove", SIG_APPLY_MOVE)?,
            current_player: Self::method(env, state, "currentPlayer", SIG_INT)?,
            run_random_playout: Self::method(env, state, "runRandomPlayout", SIG_VOID)?,
            returns: Self::method(env, state, "returns", SIG_DOUBLES)?,

            score: Self::method(env, &context, "score", SIG_SCORE)?,

            from: Self::field(env, &action, "from", SIG_INT_FIELD)?,
            to: Self::field(env, &action, "to", SIG_INT_FIELD)?,
            what: Self::method(env, &action, "what", SIG_INT)?,
            description: Self::method(env, &action, "actionDescriptionStringShort", SIG_STRING)?,

            handle: Self::field(env, agent, HANDLE_FIELD, SIG_LONG_FIELD)?,

            game_wrapper,
            state_wrapper,
        };
        log::debug!("resolved host bindings for {} and {}", GAME_WRAPPER, STATE_WRAPPER);
        Ok(bindings)
    }

    pub fn game_wrapper(&self) -> &JClass<'static> {
        self.game_wrapper.as_obj().into()
    }

    pub fn state_wrapper(&self) -> &JClass<'static> {
        self.state_wrapper.as_obj().into()
    }

    fn class<'local>(env: &mut JNIEnv<'local>, name: &str) -> anyhow::Result<JClass<'local>> {
        let result = env.find_class(name);
        checked(env, result).with_context(|| format!("finding class {}", name))
    }

    fn global(env: &mut JNIEnv, name: &str) -> anyhow::Result<GlobalRef> {
        let class = Self::class(env, name)?;
        let result = env.new_global_ref(class);
        checked(env, result).with_context(|| format!("pinning class {}", name))
    }

    fn method(env: &mut JNIEnv, class: &JClass, name: &str, sig: &str) -> anyhow::Result<JMethodID> {
        let result = env.get_method_id(class, name, sig);
        checked(env, result).with_context(|| format!("resolving method {}{}", name, sig))
    }

    fn field(env: &mut JNIEnv, class: &JClass, name: &str, sig: &str) -> anyhow::Result<JFieldID> {
        let result = env.get_field_id(class, name, sig);
        checked(env, result).with_context(|| format!("resolving field {}:{}", name, sig))
    }
}
