//! JNI entry points for the `net.lilifei.learning.jni.JniWrapper` class.
//!
//! The Java side declares:
//!
//! ```java
//! public class JniWrapper {
//!     public native int add(int a, int b);
//! }
//! ```
//!
//! and loads this library with `System.loadLibrary("ffi_adder")`.

use jni::objects::JObject;
use jni::sys::jint;
use jni::JNIEnv;

use crate::arith;

/// `JniWrapper.add(int, int)`. Instance method, so the second argument is `this`.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn Java_net_lilifei_learning_jni_JniWrapper_add<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    a: jint,
    b: jint,
) -> jint {
    arith::add(a, b)
}
