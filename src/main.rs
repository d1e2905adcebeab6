use anyhow::Result;
use clap::Parser;
use garmin_playlist_exporter::export::config::{
    DEFAULT_INVALID_CHARS, DEFAULT_MUSIC_ROOT, DEFAULT_REPLACEMENT,
};
use garmin_playlist_exporter::media::LoftyPropagator;
use garmin_playlist_exporter::model::Bitrate;
use garmin_playlist_exporter::transcode::FfmpegTranscoder;
use garmin_playlist_exporter::{PlaylistConverter, ProcessingOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "garmin-playlist-exporter")]
#[command(about = "Convert M3U playlists and their songs for Garmin devices", long_about = None)]
struct Args {
    /// The input folder; all playlists found in this folder will be processed
    #[arg(long = "input_dir")]
    input_dir: String,

    /// The output directory
    #[arg(long = "output_dir", default_value = "output")]
    output_dir: String,

    /// Bitrate of encoded mp3 files, e.g.: 160k, 256k, 320k
    #[arg(long, default_value = "320k")]
    bitrate: Bitrate,

    /// Invalid OS characters that may be present in playlist files
    #[arg(long = "invalid_chars", default_value = DEFAULT_INVALID_CHARS)]
    invalid_chars: String,

    /// Replace all invalid characters with this
    #[arg(long = "replacement_char", default_value = DEFAULT_REPLACEMENT)]
    replacement_char: String,

    /// Root path your Garmin device expects to find your music; prepended to all playlist songs
    #[arg(long = "garmin_music_root_path", default_value = DEFAULT_MUSIC_ROOT)]
    garmin_music_root_path: String,

    /// Attempt to remove leading track numbers ("01 - Title" becomes "Title")
    #[arg(long = "strip_leading_track_numbers")]
    strip_leading_track_numbers: bool,

    /// ffmpeg executable used for transcoding
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let input_dir = PathBuf::from(shellexpand::tilde(&args.input_dir).as_ref());
    let output_dir = PathBuf::from(shellexpand::tilde(&args.output_dir).as_ref());

    if !input_dir.is_dir() {
        anyhow::bail!(
            "specified input folder {:?} does not exist; aborting!",
            input_dir
        );
    }

    let options = ProcessingOptions::new(input_dir, output_dir)
        .with_bitrate(args.bitrate)
        .with_invalid_chars(&args.invalid_chars)
        .with_replacement(args.replacement_char)
        .with_music_root(args.garmin_music_root_path)
        .with_track_number_stripping(args.strip_leading_track_numbers);

    let transcoder = FfmpegTranscoder::new().with_binary(args.ffmpeg);
    let converter = PlaylistConverter::new(options, transcoder, LoftyPropagator::new());

    let options = converter.options();
    log::info!("Input path: {:?}", options.input_dir);
    log::info!("Output path: {:?}", options.output_dir);
    log::info!("Target bitrate: {}", options.bitrate);
    log::info!("Device music root: {:?}", options.music_root);

    let reports = converter.run()?;

    let written: usize = reports.iter().map(|r| r.written()).sum();
    let problems: usize = reports.iter().map(|r| r.skipped + r.failed).sum();
    log::info!(
        "Done! {} playlist(s), {} song(s) written, {} skipped or failed",
        reports.len(),
        written,
        problems
    );

    Ok(())
}
