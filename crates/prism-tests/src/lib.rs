//! Integration tests for prism crates.
//!
//! These tests check properties that hold across `prism-core` and
//! `prism-ops` together: conversion round trips, blend identities, filter
//! normalization and compositing.
