//! Host handles seen through the [`crate::host`] traits.
//!
//! Wrappers are rebuilt from the host's objects on every call and dropped
//! when the call returns; their local references die with the JNI frame.
use super::jvm::Jvm;
use crate::config::Seat;
use crate::host::*;
use jni::objects::*;
use jni::signature::{Primitive, ReturnType};
use jni::sys::jobject;

pub struct JavaGame<'a, 'local> {
    jvm: Jvm<'a, 'local>,
    wrapped: JObject<'local>,
}

impl<'a, 'local> JavaGame<'a, 'local> {
    pub fn wrap(jvm: Jvm<'a, 'local>, game: &JObject<'_>) -> anyhow::Result<Self> {
        let b = jvm.bindings();
        let wrapped = jvm.construct(b.game_wrapper(), b.game_ctor, &[JValue::Object(game).as_jni()])?;
        Ok(Self { jvm, wrapped })
    }

    fn flag(&self, method: JMethodID) -> anyhow::Result<bool> {
        Ok(self
            .jvm
            .call(&self.wrapped, method, ReturnType::Primitive(Primitive::Boolean), &[])?
            .z()?)
    }
}

impl GameView for JavaGame<'_, '_> {
    fn is_stochastic(&self) -> anyhow::Result<bool> {
        self.flag(self.jvm.bindings().is_stochastic)
    }
    fn is_imperfect_information(&self) -> anyhow::Result<bool> {
        self.flag(self.jvm.bindings().is_imperfect_information)
    }
    fn is_simultaneous_move(&self) -> anyhow::Result<bool> {
        self.flag(self.jvm.bindings().is_simultaneous_move)
    }
    fn num_players(&self) -> anyhow::Result<Seat> {
        Ok(self
            .jvm
            .call(
                &self.wrapped,
                self.jvm.bindings().num_players,
                ReturnType::Primitive(Primitive::Int),
                &[],
            )?
            .i()?)
    }
}

pub struct JavaState<'a, 'local> {
    jvm: Jvm<'a, 'local>,
    wrapped: JObject<'local>,
    context: JObject<'local>,
}

impl<'a, 'local> JavaState<'a, 'local> {
    /// Wraps the host's context; scoring goes to the context directly.
    pub fn wrap(game: &JavaGame<'a, 'local>, context: JObject<'local>) -> anyhow::Result<Self> {
        let jvm = game.jvm;
        let b = jvm.bindings();
        let wrapped = jvm.construct(
            b.state_wrapper(),
            b.state_ctor,
            &[
                JValue::Object(&game.wrapped).as_jni(),
                JValue::Object(&context).as_jni(),
            ],
        )?;
        Ok(Self {
            jvm,
            wrapped,
            context,
        })
    }

    fn int(&self, method: JMethodID) -> anyhow::Result<i32> {
        Ok(self
            .jvm
            .call(&self.wrapped, method, ReturnType::Primitive(Primitive::Int), &[])?
            .i()?)
    }

    fn void(&self, method: JMethodID, args: &[jni::sys::jvalue]) -> anyhow::Result<()> {
        self.jvm
            .call(&self.wrapped, method, ReturnType::Primitive(Primitive::Void), args)?;
        Ok(())
    }
}

impl<'a, 'local> StateView for JavaState<'a, 'local> {
    type Move = JavaMove<'a, 'local>;

    fn is_terminal(&self) -> anyhow::Result<bool> {
        Ok(self
            .jvm
            .call(
                &self.wrapped,
                self.jvm.bindings().is_terminal,
                ReturnType::Primitive(Primitive::Boolean),
                &[],
            )?
            .z()?)
    }
    fn legal_moves(&self) -> anyhow::Result<Vec<Self::Move>> {
        let array = self
            .jvm
            .call(&self.wrapped, self.jvm.bindings().legal_moves, ReturnType::Array, &[])?
            .l()?;
        Ok(self
            .jvm
            .elements(JObjectArray::from(array))?
            .into_iter()
            .map(|object| JavaMove {
                jvm: self.jvm,
                object,
            })
            .collect())
    }
    fn current_player(&self) -> anyhow::Result<Seat> {
        self.int(self.jvm.bindings().current_player)
    }
    fn score(&self, player: Seat) -> anyhow::Result<i32> {
        Ok(self
            .jvm
            .call(
                &self.context,
                self.jvm.bindings().score,
                ReturnType::Primitive(Primitive::Int),
                &[JValue::Int(player).as_jni()],
            )?
            .i()?)
    }
    fn apply_move(&mut self, action: &Self::Move) -> anyhow::Result<()> {
        self.void(
            self.jvm.bindings().apply_move,
            &[JValue::Object(&action.object).as_jni()],
        )
    }
    fn run_random_playout(&mut self) -> anyhow::Result<()> {
        self.void(self.jvm.bindings().run_random_playout, &[])
    }
    fn returns(&self) -> anyhow::Result<Vec<f64>> {
        let array = self
            .jvm
            .call(&self.wrapped, self.jvm.bindings().returns, ReturnType::Array, &[])?
            .l()?;
        self.jvm.doubles(JDoubleArray::from(array))
    }
}

pub struct JavaMove<'a, 'local> {
    jvm: Jvm<'a, 'local>,
    object: JObject<'local>,
}

impl JavaMove<'_, '_> {
    /// Hand the move back to the host as the native method's return value.
    pub fn into_raw(self) -> jobject {
        self.object.into_raw()
    }

    fn square(&self, field: JFieldID) -> anyhow::Result<i32> {
        Ok(self.jvm.field(&self.object, field, Primitive::Int)?.i()?)
    }
}

impl MoveView for JavaMove<'_, '_> {
    fn from(&self) -> anyhow::Result<i32> {
        self.square(self.jvm.bindings().from)
    }
    fn to(&self) -> anyhow::Result<i32> {
        self.square(self.jvm.bindings().to)
    }
    fn what(&self) -> anyhow::Result<i32> {
        Ok(self
            .jvm
            .call(
                &self.object,
                self.jvm.bindings().what,
                ReturnType::Primitive(Primitive::Int),
                &[],
            )?
            .i()?)
    }
    fn description(&self) -> anyhow::Result<String> {
        let string = self
            .jvm
            .call(
                &self.object,
                self.jvm.bindings().description,
                ReturnType::Object,
                &[],
            )?
            .l()?;
        self.jvm.string(&JString::from(string))
    }
}
