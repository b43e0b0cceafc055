//! Generated TypeScript bindings for the control panel core live in
//! `generated/typescript` after a build.
