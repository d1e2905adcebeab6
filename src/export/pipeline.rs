//! Main conversion pipeline orchestration

use super::config::ProcessingOptions;
use super::organizer::OutputOrganizer;
use crate::m3u::{discover_playlists, OutputPlaylist, PlaylistReader};
use crate::media::{self, MetadataPropagator};
use crate::model::{PlaylistEntry, SkipReason, SongDecision, SongError, SongOutcome, SongTask};
use crate::sanitize;
use crate::transcode::{TranscodeOrchestrator, Transcoder};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Counts for one converted playlist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistReport {
    /// Source playlist
    pub playlist: PathBuf,

    /// Written device playlist (None when the source had no songs)
    pub output: Option<PathBuf>,

    pub total: usize,
    pub transcoded: usize,
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PlaylistReport {
    fn new(playlist: &Path) -> Self {
        Self {
            playlist: playlist.to_path_buf(),
            ..Default::default()
        }
    }

    fn record(&mut self, outcome: &SongOutcome) {
        match outcome {
            SongOutcome::Transcoded { .. } => self.transcoded += 1,
            SongOutcome::Copied { .. } => self.copied += 1,
            SongOutcome::Skipped(_) => self.skipped += 1,
            SongOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Songs that ended up in the output playlist
    pub fn written(&self) -> usize {
        self.transcoded + self.copied
    }
}

/// Converts playlists and the songs they reference
pub struct PlaylistConverter<T: Transcoder, M: MetadataPropagator> {
    options: ProcessingOptions,
    organizer: OutputOrganizer,
    orchestrator: TranscodeOrchestrator<T, M>,
}

impl<T: Transcoder, M: MetadataPropagator> PlaylistConverter<T, M> {
    pub fn new(options: ProcessingOptions, transcoder: T, propagator: M) -> Self {
        let organizer = OutputOrganizer::new(
            &options.input_dir,
            &options.output_dir,
            &options.music_root,
        );

        Self {
            options,
            organizer,
            orchestrator: TranscodeOrchestrator::new(transcoder, propagator),
        }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Convert every playlist found in the input directory.
    ///
    /// A failing playlist is logged and does not stop the ones after it.
    pub fn run(&self) -> Result<Vec<PlaylistReport>> {
        fs::create_dir_all(&self.options.output_dir).with_context(|| {
            format!("Failed to create output directory {:?}", self.options.output_dir)
        })?;

        let playlists = discover_playlists(&self.options.input_dir)?;
        log::info!(
            "Found {} playlist(s) in {:?}",
            playlists.len(),
            self.options.input_dir
        );

        let mut reports = Vec::with_capacity(playlists.len());
        for playlist in &playlists {
            match self.convert_playlist(playlist) {
                Ok(report) => reports.push(report),
                Err(e) => log::error!("Failed to process playlist {:?}: {:#}", playlist, e),
            }
        }

        Ok(reports)
    }

    /// Convert a single playlist and write its device playlist
    pub fn convert_playlist(&self, playlist: &Path) -> Result<PlaylistReport> {
        log::info!("Working on {:?}:", playlist);
        let mut report = PlaylistReport::new(playlist);

        let mut reader = PlaylistReader::open(playlist)?;
        report.total = reader.remaining();

        if reader.is_empty() {
            log::warn!("No songs in {:?}, skipping", playlist);
            return Ok(report);
        }
        log::info!("Found {} songs in {:?}, starting...", report.total, playlist);

        fs::create_dir_all(&self.options.output_dir).with_context(|| {
            format!("Failed to create output directory {:?}", self.options.output_dir)
        })?;
        let output_path = OutputPlaylist::path_for(playlist, &self.options.output_dir);
        let mut output = OutputPlaylist::create(&output_path)?;

        let mut index = 0;
        while let Some(entry) = reader.next_entry() {
            index += 1;
            let task = self.prepare_song(&entry);

            log::info!(
                "[{}/{}] Converting {:?} to {} ({}bps MP3)...",
                index,
                report.total,
                task.source_path,
                task.output_name,
                self.options.bitrate
            );

            let outcome = self.process_song(&task);
            report.record(&outcome);

            match &outcome {
                SongOutcome::Skipped(SkipReason::MissingSource(path)) => {
                    log::error!(
                        "Playlist entry \"{}\" does not exist at {:?}, skipping",
                        task.entry,
                        path
                    );
                }
                SongOutcome::Failed(e) => log::error!("\"{}\": {}", task.entry, e),
                _ => {}
            }

            if let Some(line) = outcome.playlist_path() {
                output.append(line)?;
            }
        }

        let written = output.len();
        if output.is_empty() {
            log::warn!("None of the songs in {:?} could be converted", playlist);
        }
        report.output = Some(output.finish()?);
        log::info!(
            "Wrote {} of {} songs to {:?} ({} transcoded, {} copied, {} skipped, {} failed)",
            written,
            report.total,
            output_path,
            report.transcoded,
            report.copied,
            report.skipped,
            report.failed
        );

        Ok(report)
    }

    /// Resolve paths and names for an entry. Performs no I/O.
    pub fn prepare_song(&self, entry: &PlaylistEntry) -> SongTask {
        let (entry, replaced) =
            entry.replace_invalid(&self.options.invalid_chars, &self.options.replacement);
        for c in replaced {
            log::info!("Replaced invalid '{}' character(s) in \"{}\"", c, entry);
        }

        let source_path = self.options.input_dir.join(entry.as_str());
        let output_name = sanitize::output_file_name(
            entry.as_str(),
            &self.options.replacement,
            self.options.strip_track_numbers,
        );
        let relative_path = self.organizer.relative_output_path(&source_path, &output_name);
        let output_path = self.organizer.output_file_path(&relative_path);
        let format = source_path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        SongTask {
            entry: entry.as_str().to_string(),
            source_path,
            output_name,
            output_path,
            relative_path,
            format,
        }
    }

    /// Produce the output file for one song
    pub fn process_song(&self, task: &SongTask) -> SongOutcome {
        if !task.source_path.exists() {
            return SongOutcome::Skipped(SkipReason::MissingSource(task.source_path.clone()));
        }

        if let Some(parent) = task.output_path.parent() {
            if let Err(source) = fs::create_dir_all(parent) {
                return SongOutcome::Failed(SongError::OutputDir {
                    path: parent.to_path_buf(),
                    source,
                });
            }
        }

        let playlist_path = self.organizer.device_path(&task.relative_path);

        match media::decide(&task.source_path, &task.format, &self.options.bitrate) {
            SongDecision::Copy { source_kbps } => {
                log::info!(
                    "Source is already at or under target bitrate ({}kbps), copying instead...",
                    source_kbps
                );
                match fs::copy(&task.source_path, &task.output_path) {
                    Ok(_) => SongOutcome::Copied { playlist_path },
                    Err(source) => SongOutcome::Failed(SongError::Copy {
                        from: task.source_path.clone(),
                        to: task.output_path.clone(),
                        source,
                    }),
                }
            }
            SongDecision::Transcode => {
                match self.orchestrator.transcode(
                    &task.source_path,
                    &task.output_path,
                    &self.options.bitrate,
                    None,
                ) {
                    Ok(_) => SongOutcome::Transcoded { playlist_path },
                    Err(source) => SongOutcome::Failed(SongError::Transcode {
                        path: task.source_path.clone(),
                        source,
                    }),
                }
            }
        }
    }
}
