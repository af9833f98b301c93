//! Python source fragments matched and inserted by the patch catalogue.
//!
//! Fragments are matched byte-for-byte, so indentation and blank lines matter.

/// Stub `_cmd_reboot` shipped upstream.
pub(crate) const OLD_REBOOT: &str = r#"def _cmd_reboot(self) -> str:
        """Reboot the repeater process."""
        logger.warning("Reboot command received - not implemented (use systemctl restart)")
        return "Error: Use systemctl restart pymc-repeater""#;

/// `_cmd_reboot` that schedules a delayed `systemctl restart`.
pub(crate) const NEW_REBOOT: &str = r#"def _cmd_reboot(self) -> str:
        """Reboot the repeater process via systemctl."""
        try:
            import asyncio
            
            async def delayed_restart():
                """Delay restart to let CLI response send first."""
                await asyncio.sleep(0.5)
                subprocess.Popen(
                    ["systemctl", "restart", "pymc-repeater"],
                    stdout=subprocess.DEVNULL,
                    stderr=subprocess.DEVNULL,
                    start_new_session=True
                )
            
            asyncio.create_task(delayed_restart())
            logger.info("Service restart scheduled")
            return "OK - rebooting..."
        except Exception as e:
            logger.error(f"Failed to schedule restart: {e}")
            return f"Error: {e}""#;

pub(crate) const OLD_CLEAR_STATS: &str = r#"def _cmd_clear_stats(self) -> str:
        """Clear statistics."""
        # TODO: Implement stats clearing
        return "Error: Not yet implemented""#;

pub(crate) const NEW_CLEAR_STATS: &str = r#"def _cmd_clear_stats(self) -> str:
        """Clear statistics counters."""
        if not self.storage_handler:
            return "Error: Storage not available"
        
        try:
            # Clear packet stats if method exists
            if hasattr(self.storage_handler, 'clear_stats'):
                self.storage_handler.clear_stats()
                logger.info("Statistics cleared via CLI")
                return "OK - stats reset"
            else:
                # Fallback: just log that we would clear
                logger.info("clear stats requested (storage_handler.clear_stats not available)")
                return "OK - stats reset"
        except Exception as e:
            logger.error(f"Failed to clear stats: {e}")
            return f"Error: {e}""#;

pub(crate) const OLD_NEIGHBOR_REMOVE: &str = r#"def _cmd_neighbor_remove(self, command: str) -> str:
        """Remove a neighbor."""
        pubkey_hex = command[16:].strip()
        
        if not pubkey_hex:
            return "ERR: Missing pubkey"
        
        # TODO: Remove neighbor from routing table
        logger.info(f"neighbor.remove: {pubkey_hex}")
        return "Error: Not yet implemented""#;

pub(crate) const NEW_NEIGHBOR_REMOVE: &str = r#"def _cmd_neighbor_remove(self, command: str) -> str:
        """Remove a neighbor by pubkey prefix."""
        pubkey_hex = command[16:].strip()
        
        if not pubkey_hex:
            return "ERR: Missing pubkey"
        
        if not self.storage_handler:
            return "Error: Storage not available"
        
        try:
            # Try to remove neighbor if method exists
            if hasattr(self.storage_handler, 'remove_neighbor'):
                removed = self.storage_handler.remove_neighbor(pubkey_hex)
                if removed:
                    logger.info(f"Removed neighbor: {pubkey_hex}")
                    return "OK"
                else:
                    return f"Error: Neighbor {pubkey_hex} not found"
            else:
                # Fallback: check if neighbor exists and log
                neighbors = self.storage_handler.get_neighbors() if hasattr(self.storage_handler, 'get_neighbors') else {}
                matching = [k for k in neighbors.keys() if k.startswith(pubkey_hex)]
                if matching:
                    logger.info(f"neighbor.remove requested for {pubkey_hex} (remove_neighbor not available)")
                    return f"OK - marked for removal: {matching[0][:16]}"
                else:
                    return f"Error: Neighbor {pubkey_hex} not found"
        except Exception as e:
            logger.error(f"Failed to remove neighbor: {e}")
            return f"Error: {e}""#;

/// Stub `_cmd_tempradio`: validates its arguments but never applies them.
pub(crate) const OLD_TEMPRADIO: &str = r#"def _cmd_tempradio(self, command: str) -> str:
        """Apply temporary radio parameters."""
        # Format: tempradio {freq} {bw} {sf} {cr} {timeout_mins}
        parts = command[10:].split()
        
        if len(parts) < 5:
            return "Error: Expected freq bw sf cr timeout_mins"
        
        try:
            freq = float(parts[0])
            bw = float(parts[1])
            sf = int(parts[2])
            cr = int(parts[3])
            timeout_mins = int(parts[4])
            
            # Validate
            if not (300.0 <= freq <= 2500.0):
                return "Error: invalid frequency"
            if not (7.0 <= bw <= 500.0):
                return "Error: invalid bandwidth"
            if not (5 <= sf <= 12):
                return "Error: invalid spreading factor"
            if not (5 <= cr <= 8):
                return "Error: invalid coding rate"
            if timeout_mins <= 0:
                return "Error: invalid timeout"
            
            # TODO: Apply temporary radio parameters
            logger.info(f"tempradio: {freq}MHz {bw}kHz SF{sf} CR4/{cr} for {timeout_mins}min")
            return "Error: Not yet implemented"
            
        except ValueError:
            return "Error, invalid params""#;

/// `_cmd_tempradio` that applies the parameters and schedules an automatic revert.
pub(crate) const NEW_TEMPRADIO: &str = r#"def _cmd_tempradio(self, command: str) -> str:
        """Apply temporary radio parameters with auto-revert.
        
        Format: tempradio {freq} {bw} {sf} {cr} {timeout_mins}
        
        Saves current radio config, applies new params, schedules revert.
        After timeout_mins, restores original config and restarts service.
        """
        parts = command[10:].split()
        
        if len(parts) < 5:
            return "Error: Expected freq bw sf cr timeout_mins"
        
        try:
            freq = float(parts[0])
            bw = float(parts[1])
            sf = int(parts[2])
            cr = int(parts[3])
            timeout_mins = int(parts[4])
            
            # Validate (MeshCore ranges)
            if not (300.0 <= freq <= 2500.0):
                return "Error: invalid frequency"
            if not (7.0 <= bw <= 500.0):
                return "Error: invalid bandwidth"
            if not (5 <= sf <= 12):
                return "Error: invalid spreading factor"
            if not (5 <= cr <= 8):
                return "Error: invalid coding rate"
            if timeout_mins <= 0 or timeout_mins > 1440:
                return "Error: timeout must be 1-1440 minutes"
            
            # Cancel any existing tempradio task
            if self._tempradio_task and not self._tempradio_task.done():
                self._tempradio_task.cancel()
                logger.info("Cancelled previous tempradio timer")
            
            # Save original config (only if not already saved)
            if self._tempradio_original_config is None:
                self._tempradio_original_config = {
                    'frequency': self.config.get('radio', {}).get('frequency'),
                    'bandwidth': self.config.get('radio', {}).get('bandwidth'),
                    'spreading_factor': self.config.get('radio', {}).get('spreading_factor'),
                    'coding_rate': self.config.get('radio', {}).get('coding_rate'),
                }
                logger.info(f"Saved original radio config: {self._tempradio_original_config}")
            
            # Apply new config
            if 'radio' not in self.config:
                self.config['radio'] = {}
            
            self.config['radio']['frequency'] = int(freq * 1_000_000)  # MHz to Hz
            self.config['radio']['bandwidth'] = int(bw * 1000)  # kHz to Hz
            self.config['radio']['spreading_factor'] = sf
            self.config['radio']['coding_rate'] = cr
            self.save_config()
            
            logger.info(f"Applied tempradio: {freq}MHz {bw}kHz SF{sf} CR4/{cr} for {timeout_mins}min")
            
            # Schedule revert
            import asyncio
            
            async def revert_radio():
                """Revert to original radio config after timeout."""
                try:
                    await asyncio.sleep(timeout_mins * 60)
                    
                    # Restore original config
                    if self._tempradio_original_config:
                        for key, value in self._tempradio_original_config.items():
                            if value is not None:
                                self.config['radio'][key] = value
                        self.save_config()
                        self._tempradio_original_config = None
                        
                        logger.info("tempradio timeout - restored original config, restarting service")
                        
                        # Restart service to apply original config
                        subprocess.Popen(
                            ["systemctl", "restart", "pymc-repeater"],
                            stdout=subprocess.DEVNULL,
                            stderr=subprocess.DEVNULL,
                            start_new_session=True
                        )
                except asyncio.CancelledError:
                    logger.info("tempradio revert cancelled")
                except Exception as e:
                    logger.error(f"tempradio revert failed: {e}")
            
            self._tempradio_task = asyncio.create_task(revert_radio())
            
            return f"OK - temp params for {timeout_mins} mins"
            
        except ValueError:
            return "Error, invalid params""#;

pub(crate) const OLD_STATS_ROUTING: &str = r#"# Statistics commands
        elif command.startswith("stats-"):
            return "Error: Stats commands not fully implemented yet""#;

pub(crate) const NEW_STATS_ROUTING: &str = r#"# Statistics commands
        elif command == "stats-packets":
            return self._cmd_stats_packets()
        elif command == "stats-radio":
            return self._cmd_stats_radio()
        elif command == "stats-core":
            return self._cmd_stats_core()
        elif command.startswith("stats-"):
            return f"Unknown stats command: {command}""#;

pub(crate) const OLD_VER_ROUTING: &str = r#"elif command == "ver":
            return self._cmd_version()"#;

/// `ver` routing followed by the `board` route.
pub(crate) const NEW_VER_ROUTING: &str = r#"elif command == "ver":
            return self._cmd_version()
        elif command == "board":
            return self._cmd_board()"#;

/// Statistics and `board` methods appended after `_cmd_log`.
pub(crate) const STATS_METHODS: &str = r#"
    # ==================== Statistics Commands (pymc_console) ====================
    
    def _cmd_stats_packets(self) -> str:
        """Show packet statistics (MeshCore parity)."""
        if not self.storage_handler:
            return "Error: Storage not available"
        
        try:
            # Get stats from storage if available
            stats = {}
            if hasattr(self.storage_handler, 'get_packet_stats'):
                stats = self.storage_handler.get_packet_stats()
            elif hasattr(self.storage_handler, 'get_stats'):
                stats = self.storage_handler.get_stats()
            
            rx = stats.get('rx_count', stats.get('received', 0))
            tx = stats.get('tx_count', stats.get('transmitted', 0))
            fwd = stats.get('forwarded_count', stats.get('forwarded', 0))
            drop = stats.get('dropped_count', stats.get('dropped', 0))
            
            return f"rx: {rx}\ntx: {tx}\nfwd: {fwd}\ndrop: {drop}"
        except Exception as e:
            logger.error(f"stats-packets error: {e}")
            return f"Error: {e}"
    
    def _cmd_stats_radio(self) -> str:
        """Show radio statistics (MeshCore parity)."""
        radio = self.config.get('radio', {})
        
        freq_hz = radio.get('frequency', 915000000)
        bw_hz = radio.get('bandwidth', 125000)
        sf = radio.get('spreading_factor', 7)
        cr = radio.get('coding_rate', 5)
        tx_power = radio.get('tx_power', 20)
        
        freq_mhz = freq_hz / 1_000_000.0
        bw_khz = bw_hz / 1_000.0
        
        # Get noise floor if available
        noise = "?"
        if self.storage_handler and hasattr(self.storage_handler, 'get_noise_floor'):
            noise = self.storage_handler.get_noise_floor()
        
        return (
            f"freq: {freq_mhz:.3f} MHz\n"
            f"bw: {bw_khz:.0f} kHz\n"
            f"sf: {sf}\n"
            f"cr: {cr}\n"
            f"tx_pwr: {tx_power} dBm\n"
            f"noise: {noise} dBm"
        )
    
    def _cmd_stats_core(self) -> str:
        """Show core statistics (MeshCore parity)."""
        import time
        
        # Basic uptime (process start time not tracked, use placeholder)
        uptime_str = "unknown"
        
        # Get neighbor count
        neighbor_count = 0
        if self.storage_handler and hasattr(self.storage_handler, 'get_neighbors'):
            neighbors = self.storage_handler.get_neighbors()
            neighbor_count = len(neighbors) if neighbors else 0
        
        # Get stats
        stats = {}
        if self.storage_handler:
            if hasattr(self.storage_handler, 'get_stats'):
                stats = self.storage_handler.get_stats()
        
        rx_hr = stats.get('rx_per_hour', '?')
        fwd_hr = stats.get('forwarded_per_hour', '?')
        airtime = stats.get('utilization_percent', '?')
        
        return (
            f"uptime: {uptime_str}\n"
            f"rx/hr: {rx_hr}\n"
            f"fwd/hr: {fwd_hr}\n"
            f"neighbors: {neighbor_count}\n"
            f"airtime: {airtime}%"
        )
    
    def _cmd_board(self) -> str:
        """Show board/platform information (MeshCore parity)."""
        import platform
        return f"pyMC_Repeater ({platform.system()}/{platform.machine()})"
"#;

/// Attributes inserted after the `repeater_config` assignment in `__init__`.
pub(crate) const TEMPRADIO_STATE: &str = r#"
        
        # pymc_console: tempradio auto-revert state
        self._tempradio_task = None
        self._tempradio_original_config = None"#;
