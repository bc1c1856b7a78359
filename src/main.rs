fn main() {
    let code = audio_slicer::app::run(std::env::args_os());
    std::process::exit(code);
}
