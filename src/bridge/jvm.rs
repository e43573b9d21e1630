use super::bindings::Bindings;
use crate::registry::Handle;
use jni::JNIEnv;
use jni::objects::*;
use jni::signature::{Primitive, ReturnType};
use jni::sys::jvalue;
use std::cell::RefCell;

/// Turn a JNI result into an adapter error. A pending Java exception is
/// described to stderr and cleared, and the Rust call site is logged, so the
/// host sees exactly one exception: the one the export raises on the way out.
#[track_caller]
pub fn checked<T>(env: &mut JNIEnv, result: jni::errors::Result<T>) -> anyhow::Result<T> {
    let site = std::panic::Location::caller();
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_describe();
                let _ = env.exception_clear();
                log::error!("java exception at {}", site);
                Err(anyhow::anyhow!("java exception at {}", site))
            } else {
                Err(anyhow::anyhow!("jni failure at {}: {}", site, e))
            }
        }
    }
}

/// One decision's view of the JVM: the calling thread's environment and the
/// cached metadata. Copied freely into every handle wrapper.
#[derive(Clone, Copy)]
pub struct Jvm<'a, 'local> {
    env: &'a RefCell<JNIEnv<'local>>,
    bindings: &'a Bindings,
}

impl<'a, 'local> Jvm<'a, 'local> {
    pub fn new(env: &'a RefCell<JNIEnv<'local>>, bindings: &'a Bindings) -> Self {
        Self { env, bindings }
    }

    pub fn bindings(&self) -> &'a Bindings {
        self.bindings
    }

    #[track_caller]
    pub fn call(
        &self,
        object: &JObject<'_>,
        method: JMethodID,
        ret: ReturnType,
        args: &[jvalue],
    ) -> anyhow::Result<JValueOwned<'local>> {
        let ref mut env = self.env.borrow_mut();
        // SAFETY: method ids were resolved against the receiver's class with
        // the signature `ret` and `args` were built from.
        let result = unsafe { env.call_method_unchecked(object, method, ret, args) };
        checked(env, result)
    }

    #[track_caller]
    pub fn construct(
        &self,
        class: &JClass<'_>,
        ctor: JMethodID,
        args: &[jvalue],
    ) -> anyhow::Result<JObject<'local>> {
        let ref mut env = self.env.borrow_mut();
        // SAFETY: as for `call`, with a constructor id of `class`.
        let result = unsafe { env.new_object_unchecked(class, ctor, args) };
        checked(env, result)
    }

    #[track_caller]
    pub fn field(
        &self,
        object: &JObject<'_>,
        field: JFieldID,
        ty: Primitive,
    ) -> anyhow::Result<JValueOwned<'local>> {
        let ref mut env = self.env.borrow_mut();
        // SAFETY: field ids were resolved with the primitive type `ty`.
        let result = unsafe { env.get_field_unchecked(object, field, ReturnType::Primitive(ty)) };
        checked(env, result)
    }

    #[track_caller]
    pub fn string(&self, string: &JString<'_>) -> anyhow::Result<String> {
        if string.is_null() {
            return Ok(String::new());
        }
        let ref mut env = self.env.borrow_mut();
        let result = env.get_string(string).map(String::from);
        checked(env, result)
    }

    #[track_caller]
    pub fn elements(&self, array: JObjectArray<'local>) -> anyhow::Result<Vec<JObject<'local>>> {
        let ref mut env = self.env.borrow_mut();
        let result = env.get_array_length(&array);
        let n = checked(env, result)?;
        let result = env.ensure_local_capacity(n.saturating_add(16));
        checked(env, result)?;
        (0..n)
            .map(|i| {
                let result = env.get_object_array_element(&array, i);
                checked(env, result)
            })
            .collect()
    }

    #[track_caller]
    pub fn doubles(&self, array: JDoubleArray<'local>) -> anyhow::Result<Vec<f64>> {
        let ref mut env = self.env.borrow_mut();
        let result = env.get_array_length(&array);
        let n = checked(env, result)?;
        let mut buffer = vec![0.; n as usize];
        let result = env.get_double_array_region(&array, 0, &mut buffer);
        checked(env, result)?;
        Ok(buffer)
    }

    /// Handle stored in the host-side adapter object.
    pub fn handle(&self, agent: &JObject<'_>) -> anyhow::Result<Handle> {
        Ok(self
            .field(agent, self.bindings.handle, Primitive::Long)?
            .j()?)
    }

    pub fn set_handle(&self, agent: &JObject<'_>, handle: Handle) -> anyhow::Result<()> {
        let ref mut env = self.env.borrow_mut();
        // SAFETY: `handle` was resolved as a `long` field of the adapter class.
        let result =
            unsafe { env.set_field_unchecked(agent, self.bindings.handle, JValue::Long(handle)) };
        checked(env, result)
    }
}
