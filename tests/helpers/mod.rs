#![allow(dead_code)]

use quarry::miner::SourceLimits;
use std::path::{Path, PathBuf};

/// Limits matching the default mining config.
pub fn default_limits() -> SourceLimits {
    SourceLimits {
        max_file_bytes: 1_000_000,
        max_line_len: 1000,
    }
}

/// Write a file at `rel` under `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, contents).unwrap();
    path
}

/// A realistic Singleton implementation that passes every validity gate.
pub const SINGLETON_TS: &str = r#"export class AppConfig {
    private static instance: AppConfig;

    private constructor(private readonly values: Map<string, string>) {}

    public static getInstance(): AppConfig {
        if (!AppConfig.instance) {
            AppConfig.instance = new AppConfig(new Map());
        }
        return AppConfig.instance;
    }

    public get(key: string): string | undefined {
        return this.values.get(key);
    }
}
"#;

/// A realistic Observer implementation that passes every validity gate.
pub const OBSERVER_TS: &str = r#"export interface Observer {
    update(event: string): void;
}

export class Subject {
    private observers: Observer[] = [];

    subscribe(observer: Observer): void {
        this.observers.push(observer);
    }

    unsubscribe(observer: Observer): void {
        this.observers = this.observers.filter(o => o !== observer);
    }

    notify(event: string): void {
        for (const observer of this.observers) {
            observer.update(event);
        }
    }
}
"#;
