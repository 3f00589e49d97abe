/*
    dumpfox
    https://github.com/dbalsom/dumpfox

    Copyright 2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    tests/common/mod.rs

    Common support routines for tests
*/
#![allow(dead_code)]

use dumpfox::prelude::*;

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Assert the round-trip law for one state: it generates, the text
/// re-validates, and the re-validated state generates identical text.
pub fn assert_round_trip<T: Tool>(state: &ExecutionState<T>) {
    let text = state.generate().expect("state should be complete enough to generate");
    let reparsed = ExecutionState::<T>::from_cmdline(&text)
        .unwrap_or_else(|e| panic!("generated text failed to re-validate: '{}': {}", text, e));
    assert_eq!(reparsed.generate().as_deref(), Some(text.as_str()), "round trip diverged");
}

/// Positional filler matching a command's arity contract, in the exact form
/// generation would emit it.
pub fn positional_filler(arity: Arity) -> &'static str {
    match arity {
        Arity::None => "",
        Arity::Device => " D:",
        Arity::Image => " \"disc.img\"",
        Arity::DeviceAndImage => " D: \"disc.img\"",
        Arity::ImagePair => " \"in.img\" \"out.img\"",
        Arity::RemoteHost => " \"dumper.local\"",
    }
}
