//! TypeScript bindings for hosts that render [`FunnelSnapshot`].

use crate::content::ContentTier;
use crate::funnel::{
    FunnelSnapshot, GateStep, GateView, InterstitialStage, PickerMenu, ReadingPosition,
    RevealPhase,
};
use crate::language::{Language, LanguageSelection, Level};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use ts_rs::TS;

const INDEX_CONTENT: &str = r#"export type { ContentTier } from "./ContentTier";
export type { FunnelSnapshot } from "./FunnelSnapshot";
export type { GateStep } from "./GateStep";
export type { GateView } from "./GateView";
export type { InterstitialStage } from "./InterstitialStage";
export type { Language } from "./Language";
export type { LanguageSelection } from "./LanguageSelection";
export type { Level } from "./Level";
export type { PickerMenu } from "./PickerMenu";
export type { ReadingPosition } from "./ReadingPosition";
export type { RevealPhase } from "./RevealPhase";
"#;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<()> {
    T::export_all_to(out_dir)
        .with_context(|| format!("Failed to export {}", T::ident()))
}

/// Regenerates every `.ts` file in `out_dir`, removing stale ones first.
pub fn export_ts_bindings(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for entry in
        fs::read_dir(out_dir).with_context(|| format!("Failed to list {}", out_dir.display()))?
    {
        let path = entry.context("Failed to read entry")?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    export_single_type::<ContentTier>(out_dir)?;
    export_single_type::<FunnelSnapshot>(out_dir)?;
    export_single_type::<GateStep>(out_dir)?;
    export_single_type::<GateView>(out_dir)?;
    export_single_type::<InterstitialStage>(out_dir)?;
    export_single_type::<Language>(out_dir)?;
    export_single_type::<LanguageSelection>(out_dir)?;
    export_single_type::<Level>(out_dir)?;
    export_single_type::<PickerMenu>(out_dir)?;
    export_single_type::<ReadingPosition>(out_dir)?;
    export_single_type::<RevealPhase>(out_dir)?;

    let index = out_dir.join("index.ts");
    fs::write(&index, INDEX_CONTENT)
        .with_context(|| format!("Failed to write {}", index.display()))?;
    Ok(())
}
